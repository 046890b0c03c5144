// Rawkeys Normalized Events
// The device-agnostic key/button event handed to the sink

use std::fmt;

use crate::{DeviceId, Direction, Key};

/// One logical press or release, already disambiguated and translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub device: DeviceId,
    pub key: Key,
    pub direction: Direction,
}

impl KeyEvent {
    pub fn new(device: DeviceId, key: Key, direction: Direction) -> Self {
        Self {
            device,
            key,
            direction,
        }
    }

    pub fn down(device: DeviceId, key: Key) -> Self {
        Self::new(device, key, Direction::Down)
    }

    pub fn up(device: DeviceId, key: Key) -> Self {
        Self::new(device, key, Direction::Up)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.device, self.key, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{BTN_RIGHT, KEY_A};

    #[test]
    fn test_event_constructors() {
        let ev = KeyEvent::down(DeviceId::Keyboard, KEY_A);
        assert_eq!(ev.direction, Direction::Down);
        assert_eq!(KeyEvent::up(DeviceId::Mouse, BTN_RIGHT).direction, Direction::Up);
    }

    #[test]
    fn test_event_display() {
        let ev = KeyEvent::up(DeviceId::Mouse, BTN_RIGHT);
        assert_eq!(ev.to_string(), "mouse BTN_RIGHT up");
    }
}
