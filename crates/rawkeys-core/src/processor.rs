// Rawkeys Raw Input Processor
// Decodes raw notifications and turns them into normalized key events

use std::sync::Arc;

use parking_lot::Mutex;

use crate::disambiguate::{resolve_true_key, ScanCodeMap};
use crate::held::HeldKeys;
use crate::pointer::{ButtonCapabilities, PointerMotion};
use crate::raw::{DecodedEvent, KeyboardPayload, MousePayload, RawEventDecoder, RawInputSource};
use crate::{DeviceId, Direction, EventSink, Key, KeyEvent, Settings, TranslationTable};

/// Owns every piece of per-subsystem input state.
///
/// Created when the input subsystem starts and shut down with
/// [`shutdown`](Self::shutdown). All operations take `&mut self`, so
/// decodes can never overlap.
pub struct RawInputProcessor {
    decoder: RawEventDecoder,
    keys: HeldKeys,
    buttons_held: HeldKeys,
    motion: PointerMotion,
    table: TranslationTable,
    scan_map: Box<dyn ScanCodeMap + Send>,
    buttons: ButtonCapabilities,
}

impl RawInputProcessor {
    /// Default translation table, right pointer button only, and the
    /// platform scan-code map.
    pub fn new() -> Self {
        Self {
            decoder: RawEventDecoder::new(),
            keys: HeldKeys::new(),
            buttons_held: HeldKeys::new(),
            motion: PointerMotion::new(),
            table: TranslationTable::default(),
            scan_map: crate::platform::default_scan_map(),
            buttons: ButtonCapabilities::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .with_table(settings.translation_table())
            .with_buttons(settings.pointer_buttons())
    }

    pub fn with_table(mut self, table: TranslationTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_scan_map(mut self, scan_map: Box<dyn ScanCodeMap + Send>) -> Self {
        self.scan_map = scan_map;
        self
    }

    pub fn with_buttons(mut self, buttons: ButtonCapabilities) -> Self {
        self.buttons = buttons;
        self
    }

    /// Decode one notification and emit whatever it produces.
    ///
    /// Returns false when the notification was abandoned or ignored.
    pub fn process<S>(&mut self, source: &S, handle: S::Handle, sink: &mut dyn EventSink) -> bool
    where
        S: RawInputSource + ?Sized,
    {
        match self.decoder.decode(source, handle) {
            Some(event) => {
                self.handle_event(event, sink);
                true
            }
            None => false,
        }
    }

    /// Like [`process`](Self::process) for a payload already in memory
    pub fn process_payload(&mut self, bytes: &[u8], sink: &mut dyn EventSink) -> bool {
        match RawEventDecoder::classify(bytes) {
            Some(event) => {
                self.handle_event(event, sink);
                true
            }
            None => false,
        }
    }

    pub fn handle_event(&mut self, event: DecodedEvent, sink: &mut dyn EventSink) {
        match event {
            DecodedEvent::Keyboard(kb) => self.handle_keyboard(&kb, sink),
            DecodedEvent::Mouse(m) => self.handle_mouse(&m, sink),
        }
    }

    fn handle_keyboard(&mut self, kb: &KeyboardPayload, sink: &mut dyn EventSink) {
        let Some(message) = kb.message_kind() else {
            log::trace!("ignoring keyboard message 0x{:04X}", kb.message);
            return;
        };

        let vk = resolve_true_key(kb.vkey, kb.make_code, kb.is_extended(), &*self.scan_map);
        let key = self.table.translate(vk);
        if !key.is_mapped() {
            log::trace!("dropping unmapped {} (reported {})", vk, kb.vkey);
            return;
        }

        if message.is_down() {
            emit(sink, KeyEvent::down(DeviceId::Keyboard, key));
            self.keys.mark_down(key);
        } else if self.keys.mark_up(key).should_emit() {
            emit(sink, KeyEvent::up(DeviceId::Keyboard, key));
        } else {
            log::trace!("ignoring release of {} already flushed", key);
        }
    }

    fn handle_mouse(&mut self, m: &MousePayload, sink: &mut dyn EventSink) {
        self.motion.accumulate(m.last_x, m.last_y);

        for (button, direction) in self.buttons.edges(m) {
            let key = self.table.translate(button.virtual_key());
            if !key.is_mapped() {
                log::trace!("dropping unmapped pointer button {}", button);
                continue;
            }
            match direction {
                Direction::Down => {
                    emit(sink, KeyEvent::down(DeviceId::Mouse, key));
                    self.buttons_held.mark_down(key);
                }
                Direction::Up => {
                    if self.buttons_held.mark_up(key).should_emit() {
                        emit(sink, KeyEvent::up(DeviceId::Mouse, key));
                    } else {
                        log::trace!("ignoring release of {} already flushed", key);
                    }
                }
            }
        }
    }

    /// Release everything still held, keyboard keys first, in press order.
    ///
    /// Returns the number of release events emitted. Held state is emptied,
    /// and the first real release of each flushed key is ignored.
    pub fn lose_focus(&mut self, sink: &mut dyn EventSink) -> usize {
        let keys = self.keys.flush_all_as_up();
        let buttons = self.buttons_held.flush_all_as_up();

        for key in &keys {
            emit(sink, KeyEvent::up(DeviceId::Keyboard, *key));
        }
        for key in &buttons {
            emit(sink, KeyEvent::up(DeviceId::Mouse, *key));
        }

        let released = keys.len() + buttons.len();
        if released > 0 {
            log::info!("focus lost, released {} held key(s)", released);
        }
        released
    }

    /// Tear down: release held keys and discard pending motion
    pub fn shutdown(&mut self, sink: &mut dyn EventSink) -> usize {
        let released = self.lose_focus(sink);
        self.motion.reset();
        released
    }

    /// Drain the accumulated pointer motion
    pub fn take_motion(&mut self) -> (i32, i32) {
        self.motion.take()
    }

    pub fn motion(&self) -> &PointerMotion {
        &self.motion
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.keys
    }

    pub fn held_buttons(&self) -> &HeldKeys {
        &self.buttons_held
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.is_held(key) || self.buttons_held.is_held(key)
    }

    pub fn decoder(&self) -> &RawEventDecoder {
        &self.decoder
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn buttons(&self) -> ButtonCapabilities {
        self.buttons
    }
}

impl Default for RawInputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RawInputProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawInputProcessor")
            .field("decoder", &self.decoder)
            .field("keys", &self.keys)
            .field("buttons_held", &self.buttons_held)
            .field("motion", &self.motion)
            .field("buttons", &self.buttons)
            .finish_non_exhaustive()
    }
}

fn emit(sink: &mut dyn EventSink, event: KeyEvent) {
    log::trace!("emit {}", event);
    sink.emit(event);
}

/// A processor shared between a window procedure and the rest of the app.
///
/// Notifications that arrive while the processor is busy (reentrant
/// delivery) are dropped rather than blocking the thread that holds it.
#[derive(Debug, Clone, Default)]
pub struct SharedProcessor {
    inner: Arc<Mutex<RawInputProcessor>>,
}

impl SharedProcessor {
    pub fn new(processor: RawInputProcessor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(processor)),
        }
    }

    /// Process a notification unless another one is in flight.
    ///
    /// `None` means the processor was busy and the notification was dropped.
    pub fn try_process<S>(
        &self,
        source: &S,
        handle: S::Handle,
        sink: &mut dyn EventSink,
    ) -> Option<bool>
    where
        S: RawInputSource + ?Sized,
    {
        let mut processor = self.inner.try_lock()?;
        Some(processor.process(source, handle, sink))
    }

    /// `None` when a flush or decode is already running
    pub fn try_lose_focus(&self, sink: &mut dyn EventSink) -> Option<usize> {
        let mut processor = self.inner.try_lock()?;
        Some(processor.lose_focus(sink))
    }

    /// Drain motion unless the processor is busy.
    ///
    /// `None` when called from inside a decode, e.g. from a sink.
    pub fn take_motion(&self) -> Option<(i32, i32)> {
        let mut processor = self.inner.try_lock()?;
        Some(processor.take_motion())
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut RawInputProcessor) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
