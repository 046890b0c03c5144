// Rawkeys Raw Input Layer
// Buffer management, payload layout and decoding of raw notifications

mod buffer;
mod decoder;
pub mod payload;
mod source;

pub use buffer::RawEventBuffer;
pub use decoder::RawEventDecoder;
pub use payload::{DecodedEvent, DeviceType, KeyMessage, KeyboardPayload, MousePayload};
pub use source::{MemorySource, RawInputSource, SourceError};
