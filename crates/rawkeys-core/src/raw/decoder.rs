// Rawkeys Raw Event Decoder
// Size query -> buffer preparation -> fetch -> classification

use super::payload::{self, DecodedEvent};
use super::{RawEventBuffer, RawInputSource};

/// Turns raw notification handles into classified payloads.
///
/// Decoding is best-effort: a failed size query or fetch, a truncated
/// payload, or an unsupported device type all yield `None`.
#[derive(Debug, Default)]
pub struct RawEventDecoder {
    buffer: RawEventBuffer,
}

impl RawEventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &RawEventBuffer {
        &self.buffer
    }

    /// Fetch and classify the payload behind `handle`
    pub fn decode<S>(&mut self, source: &S, handle: S::Handle) -> Option<DecodedEvent>
    where
        S: RawInputSource + ?Sized,
    {
        let required = match source.required_size(handle) {
            Ok(0) => {
                log::debug!("raw input {:?} reported an empty payload", handle);
                return None;
            }
            Ok(size) => size,
            Err(e) => {
                log::debug!("abandoning raw input {:?}: {}", handle, e);
                return None;
            }
        };

        let window = self.buffer.prepare(required);
        let written = match source.fetch(handle, window) {
            Ok(written) => written.min(required),
            Err(e) => {
                log::debug!("abandoning raw input {:?}: {}", handle, e);
                return None;
            }
        };

        Self::classify(&window[..written])
    }

    /// Classify an already-fetched payload
    pub fn classify(bytes: &[u8]) -> Option<DecodedEvent> {
        let event = payload::parse(bytes);
        if event.is_none() {
            match payload::parse_header(bytes) {
                Some(header) => log::debug!(
                    "ignoring raw input from {:?} device ({} bytes)",
                    header.device_type,
                    bytes.len()
                ),
                None => log::debug!("ignoring truncated raw input ({} bytes)", bytes.len()),
            }
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::payload::{
        encode, encode_hid, KeyMessage, KeyboardPayload, MousePayload, HEADER_SIZE,
        KEYBOARD_SIZE, MOUSE_SIZE,
    };
    use crate::raw::MemorySource;
    use crate::VirtualKey;

    fn keyboard_bytes() -> (KeyboardPayload, Vec<u8>) {
        let kb = KeyboardPayload::new(VirtualKey::KEY_A, 0x1E, 0, KeyMessage::KeyDown);
        (kb, encode(&DecodedEvent::Keyboard(kb)))
    }

    #[test]
    fn test_decode_keyboard() {
        let (kb, bytes) = keyboard_bytes();
        let mut source = MemorySource::new();
        let h = source.push(bytes);

        let mut decoder = RawEventDecoder::new();
        assert_eq!(decoder.decode(&source, h), Some(DecodedEvent::Keyboard(kb)));
        assert_eq!(decoder.buffer().capacity(), HEADER_SIZE + KEYBOARD_SIZE);
    }

    #[test]
    fn test_decode_grows_for_mouse_after_keyboard() {
        let (_, kb_bytes) = keyboard_bytes();
        let mouse = MousePayload::motion(2, 3);
        let mut source = MemorySource::new();
        let a = source.push(kb_bytes);
        let b = source.push(encode(&DecodedEvent::Mouse(mouse)));

        let mut decoder = RawEventDecoder::new();
        decoder.decode(&source, a);
        assert_eq!(decoder.decode(&source, b), Some(DecodedEvent::Mouse(mouse)));
        assert_eq!(decoder.buffer().capacity(), HEADER_SIZE + MOUSE_SIZE);
        assert_eq!(decoder.buffer().grow_count(), 2);
    }

    #[test]
    fn test_smaller_payload_uses_valid_prefix() {
        let (kb, kb_bytes) = keyboard_bytes();
        let mut source = MemorySource::new();
        let big = source.push(encode(&DecodedEvent::Mouse(MousePayload::motion(-7, 9))));
        let small = source.push(kb_bytes);

        let mut decoder = RawEventDecoder::new();
        decoder.decode(&source, big);
        let capacity = decoder.buffer().capacity();

        assert_eq!(decoder.decode(&source, small), Some(DecodedEvent::Keyboard(kb)));
        assert_eq!(decoder.buffer().capacity(), capacity);
        assert_eq!(decoder.buffer().grow_count(), 1);
    }

    #[test]
    fn test_failed_size_query_is_noop() {
        let (_, bytes) = keyboard_bytes();
        let mut source = MemorySource::new();
        let h = source.push(bytes);
        source.fail_size_query(h);

        let mut decoder = RawEventDecoder::new();
        assert_eq!(decoder.decode(&source, h), None);
        assert!(!decoder.buffer().is_allocated());
    }

    #[test]
    fn test_failed_fetch_is_noop() {
        let (_, bytes) = keyboard_bytes();
        let mut source = MemorySource::new();
        let h = source.push(bytes);
        source.fail_fetch(h);

        let mut decoder = RawEventDecoder::new();
        assert_eq!(decoder.decode(&source, h), None);
    }

    #[test]
    fn test_hid_payload_is_noop() {
        let mut source = MemorySource::new();
        let h = source.push(encode_hid(&[0u8; 32]));

        let mut decoder = RawEventDecoder::new();
        assert_eq!(decoder.decode(&source, h), None);
        // The buffer still grew to hold the payload
        assert!(decoder.buffer().capacity() >= HEADER_SIZE + 40);
    }

    #[test]
    fn test_unknown_handle_is_noop() {
        let source = MemorySource::new();
        let mut decoder = RawEventDecoder::new();
        assert_eq!(decoder.decode(&source, 3), None);
    }
}
