// Rawkeys Event Sinks
// Synchronous delivery of normalized events to the application

use std::sync::mpsc::Sender;

use crate::KeyEvent;

/// Receives normalized events one at a time, in arrival order.
///
/// Implementations must deliver synchronously and must not feed input back
/// into the processor that is emitting.
pub trait EventSink {
    fn emit(&mut self, event: KeyEvent);
}

impl EventSink for Vec<KeyEvent> {
    fn emit(&mut self, event: KeyEvent) {
        self.push(event);
    }
}

/// Forwards to a channel; events are dropped once the receiver hangs up
impl EventSink for Sender<KeyEvent> {
    fn emit(&mut self, event: KeyEvent) {
        if self.send(event).is_err() {
            log::trace!("event receiver gone, dropping {}", event);
        }
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(KeyEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: KeyEvent) {
        (self.0)(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: KeyEvent) {
        (**self).emit(event)
    }
}
