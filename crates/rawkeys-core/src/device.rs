// Rawkeys Device Classes
// Identifies which class of device a normalized event came from

use strum_macros::{Display, EnumString};

/// Device class of a normalized event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceId {
    Keyboard,
    Mouse,
    /// Generic HID joystick/gamepad; reserved, never produced by the decoder
    Pad,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_device_id_display() {
        assert_eq!(DeviceId::Keyboard.to_string(), "keyboard");
        assert_eq!(DeviceId::Mouse.to_string(), "mouse");
    }

    #[test]
    fn test_device_id_parse() {
        assert_eq!(DeviceId::from_str("Mouse"), Ok(DeviceId::Mouse));
        assert!(DeviceId::from_str("tablet").is_err());
    }
}
