// Rawkeys Core Library
// Raw device input -> normalized key/button events

pub mod device;
pub mod direction;
pub mod disambiguate;
pub mod event;
pub mod held;
pub mod key;
pub mod platform;
pub mod pointer;
pub mod processor;
pub mod raw;
pub mod registration;
pub mod settings;
pub mod sink;
pub mod trace;
pub mod translate;
pub mod vkey;

pub use device::DeviceId;
pub use direction::Direction;
pub use disambiguate::{resolve_true_key, ScanCodeMap, StandardScanCodeMap};
pub use event::KeyEvent;
pub use held::{FlushedKeys, HeldKeys, Release};
pub use key::Key;
pub use pointer::{ButtonCapabilities, PointerButton, PointerMotion};
pub use processor::{RawInputProcessor, SharedProcessor};
pub use raw::{
    DecodedEvent, KeyMessage, KeyboardPayload, MemorySource, MousePayload, RawEventBuffer,
    RawEventDecoder, RawInputSource, SourceError,
};
pub use registration::{
    initialize, initialize_with_settings, registration_requests, DeviceRequest, Registrar,
    RegistrationError,
};
pub use settings::{Settings, SettingsError};
pub use sink::{EventSink, FnSink};
pub use trace::{ReplaySummary, Trace, TraceError, TraceStep};
pub use translate::TranslationTable;
pub use vkey::VirtualKey;

#[cfg(windows)]
pub use platform::{SystemScanCodeMap, WindowsRawInput, WindowsRegistrar};
