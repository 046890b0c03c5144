// Rawkeys Decode Buffer
// Single reusable byte buffer for raw payloads

/// Reusable payload buffer owned by the decoder.
///
/// Capacity never decreases. Contents are only meaningful within the
/// decode call that filled them.
#[derive(Debug, Default)]
pub struct RawEventBuffer {
    bytes: Vec<u8>,
    grow_count: usize,
}

impl RawEventBuffer {
    /// An unallocated buffer; the first payload sizes it exactly
    pub fn new() -> Self {
        Self::default()
    }

    /// Usable capacity in bytes
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_allocated(&self) -> bool {
        !self.bytes.is_empty()
    }

    /// How many times the buffer has been (re)allocated
    pub fn grow_count(&self) -> usize {
        self.grow_count
    }

    /// Return a writable window of exactly `required` bytes, growing first
    /// when the current capacity is too small.
    ///
    /// Growing replaces the allocation; previous contents are discarded.
    pub fn prepare(&mut self, required: usize) -> &mut [u8] {
        if required > self.bytes.len() {
            log::trace!(
                "growing raw input buffer {} -> {} bytes",
                self.bytes.len(),
                required
            );
            self.bytes = vec![0; required];
            self.grow_count += 1;
        }
        &mut self.bytes[..required]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_use_allocates_exact_size() {
        let mut buf = RawEventBuffer::new();
        assert!(!buf.is_allocated());
        assert_eq!(buf.prepare(40).len(), 40);
        assert_eq!(buf.capacity(), 40);
        assert_eq!(buf.grow_count(), 1);
    }

    #[test]
    fn test_grows_on_larger_request() {
        let mut buf = RawEventBuffer::new();
        buf.prepare(40);
        buf.prepare(48);
        assert_eq!(buf.capacity(), 48);
        assert_eq!(buf.grow_count(), 2);
    }

    #[test]
    fn test_never_shrinks() {
        let mut buf = RawEventBuffer::new();
        buf.prepare(48);
        let window = buf.prepare(16);
        assert_eq!(window.len(), 16);
        assert_eq!(buf.capacity(), 48);
        assert_eq!(buf.grow_count(), 1);
    }

    #[test]
    fn test_equal_request_reuses_allocation() {
        let mut buf = RawEventBuffer::new();
        buf.prepare(40);
        buf.prepare(40);
        assert_eq!(buf.grow_count(), 1);
    }
}
