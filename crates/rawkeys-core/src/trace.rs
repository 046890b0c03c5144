// Rawkeys Trace Replay
// Recorded raw notifications read from TOML and fed through a processor

use std::path::Path;

use crate::raw::payload::{encode, encode_hid};
use crate::raw::{DecodedEvent, KeyMessage, KeyboardPayload, MemorySource, MousePayload};
use crate::{EventSink, RawInputProcessor, VirtualKey};

/// Errors that can occur when loading a trace
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid trace event #{index}: {reason}")]
    InvalidEvent { index: usize, reason: String },
}

#[derive(Debug, serde::Deserialize)]
struct TraceToml {
    #[serde(default)]
    event: Vec<EntryToml>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EntryToml {
    Keyboard {
        vkey: u16,
        #[serde(default)]
        make_code: u16,
        #[serde(default)]
        flags: u16,
        message: String,
    },
    Mouse {
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dy: i32,
        #[serde(default)]
        button_flags: u16,
    },
    Hid {
        #[serde(default)]
        report: Vec<u8>,
    },
    FocusLost,
}

/// One step of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStep {
    /// A raw notification; the value is its handle in the trace's source
    Notification(usize),
    FocusLost,
}

/// Counters from one replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Notifications that decoded into a keyboard or mouse payload
    pub decoded: usize,
    /// Notifications abandoned or ignored
    pub ignored: usize,
    /// Releases synthesized by focus loss
    pub released: usize,
}

/// A replayable sequence of raw notifications and focus changes
#[derive(Debug, Clone, Default)]
pub struct Trace {
    source: MemorySource,
    steps: Vec<TraceStep>,
}

fn parse_message(raw: &str) -> Option<KeyMessage> {
    match raw.to_ascii_lowercase().as_str() {
        "keydown" | "down" => Some(KeyMessage::KeyDown),
        "syskeydown" => Some(KeyMessage::SysKeyDown),
        "keyup" | "up" => Some(KeyMessage::KeyUp),
        "syskeyup" => Some(KeyMessage::SysKeyUp),
        _ => None,
    }
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, TraceError> {
        let parsed: TraceToml =
            toml::from_str(content).map_err(|e| TraceError::TomlParse(e.to_string()))?;

        let mut trace = Self::new();
        for (index, entry) in parsed.event.into_iter().enumerate() {
            match entry {
                EntryToml::Keyboard {
                    vkey,
                    make_code,
                    flags,
                    message,
                } => {
                    let message = parse_message(&message).ok_or_else(|| TraceError::InvalidEvent {
                        index,
                        reason: format!("unknown keyboard message '{}'", message),
                    })?;
                    trace.push_event(DecodedEvent::Keyboard(KeyboardPayload::new(
                        VirtualKey(vkey),
                        make_code,
                        flags,
                        message,
                    )));
                }
                EntryToml::Mouse {
                    dx,
                    dy,
                    button_flags,
                } => {
                    trace.push_event(DecodedEvent::Mouse(
                        MousePayload::motion(dx, dy).with_buttons(button_flags),
                    ));
                }
                EntryToml::Hid { report } => trace.push_payload(encode_hid(&report)),
                EntryToml::FocusLost => trace.push_focus_lost(),
            }
        }
        Ok(trace)
    }

    pub fn push_event(&mut self, event: DecodedEvent) {
        self.push_payload(encode(&event));
    }

    pub fn push_payload(&mut self, payload: Vec<u8>) {
        let handle = self.source.push(payload);
        self.steps.push(TraceStep::Notification(handle));
    }

    pub fn push_focus_lost(&mut self) {
        self.steps.push(TraceStep::FocusLost);
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn source(&self) -> &MemorySource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feed every step through `processor` in order
    pub fn replay(&self, processor: &mut RawInputProcessor, sink: &mut dyn EventSink) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for step in &self.steps {
            match *step {
                TraceStep::Notification(handle) => {
                    if processor.process(&self.source, handle, sink) {
                        summary.decoded += 1;
                    } else {
                        summary.ignored += 1;
                    }
                }
                TraceStep::FocusLost => summary.released += processor.lose_focus(sink),
            }
        }
        log::debug!(
            "replayed {} steps: {} decoded, {} ignored, {} released",
            self.steps.len(),
            summary.decoded,
            summary.ignored,
            summary.released
        );
        summary
    }
}
