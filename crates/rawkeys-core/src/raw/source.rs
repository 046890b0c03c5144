// Rawkeys Raw Input Sources
// The two-step size-query/fetch protocol behind a raw notification handle

use std::collections::HashSet;

/// Errors reported by a raw input source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("size query failed (os error {code})")]
    SizeQuery { code: u32 },

    #[error("payload fetch failed (os error {code})")]
    Fetch { code: u32 },

    #[error("unknown raw input handle")]
    UnknownHandle,

    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Resolves opaque notification handles into payload bytes.
///
/// Callers first ask for the required size, then fetch into a buffer of at
/// least that many bytes.
pub trait RawInputSource {
    type Handle: Copy + std::fmt::Debug;

    /// Bytes needed to hold the payload referenced by `handle`
    fn required_size(&self, handle: Self::Handle) -> Result<usize, SourceError>;

    /// Copy the payload into `buf`, returning the number of bytes written
    fn fetch(&self, handle: Self::Handle, buf: &mut [u8]) -> Result<usize, SourceError>;
}

/// In-memory source where a handle is an index into recorded payloads.
///
/// Used for trace replay; failures can be injected per handle.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    payloads: Vec<Vec<u8>>,
    failing_size: HashSet<usize>,
    failing_fetch: HashSet<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a payload and return its handle
    pub fn push(&mut self, payload: Vec<u8>) -> usize {
        self.payloads.push(payload);
        self.payloads.len() - 1
    }

    /// Make the size query for `handle` fail
    pub fn fail_size_query(&mut self, handle: usize) {
        self.failing_size.insert(handle);
    }

    /// Make the fetch for `handle` fail
    pub fn fail_fetch(&mut self, handle: usize) {
        self.failing_fetch.insert(handle);
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// All recorded handles in insertion order
    pub fn handles(&self) -> std::ops::Range<usize> {
        0..self.payloads.len()
    }
}

impl RawInputSource for MemorySource {
    type Handle = usize;

    fn required_size(&self, handle: usize) -> Result<usize, SourceError> {
        if self.failing_size.contains(&handle) {
            return Err(SourceError::SizeQuery { code: 6 });
        }
        self.payloads
            .get(handle)
            .map(Vec::len)
            .ok_or(SourceError::UnknownHandle)
    }

    fn fetch(&self, handle: usize, buf: &mut [u8]) -> Result<usize, SourceError> {
        if self.failing_fetch.contains(&handle) {
            return Err(SourceError::Fetch { code: 6 });
        }
        let payload = self.payloads.get(handle).ok_or(SourceError::UnknownHandle)?;
        if buf.len() < payload.len() {
            return Err(SourceError::BufferTooSmall {
                needed: payload.len(),
                available: buf.len(),
            });
        }
        buf[..payload.len()].copy_from_slice(payload);
        Ok(payload.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_roundtrip() {
        let mut source = MemorySource::new();
        let h = source.push(vec![1, 2, 3]);
        assert_eq!(source.required_size(h), Ok(3));

        let mut buf = [0u8; 8];
        assert_eq!(source.fetch(h, &mut buf), Ok(3));
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_memory_source_unknown_handle() {
        let source = MemorySource::new();
        assert_eq!(source.required_size(4), Err(SourceError::UnknownHandle));
    }

    #[test]
    fn test_memory_source_small_buffer() {
        let mut source = MemorySource::new();
        let h = source.push(vec![0; 10]);
        let mut buf = [0u8; 4];
        assert_eq!(
            source.fetch(h, &mut buf),
            Err(SourceError::BufferTooSmall { needed: 10, available: 4 })
        );
    }

    #[test]
    fn test_memory_source_injected_failures() {
        let mut source = MemorySource::new();
        let a = source.push(vec![0; 4]);
        let b = source.push(vec![0; 4]);
        source.fail_size_query(a);
        source.fail_fetch(b);

        assert!(matches!(source.required_size(a), Err(SourceError::SizeQuery { .. })));
        assert_eq!(source.required_size(b), Ok(4));
        let mut buf = [0u8; 4];
        assert!(matches!(source.fetch(b, &mut buf), Err(SourceError::Fetch { .. })));
    }
}
