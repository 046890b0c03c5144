// Rawkeys Device Registration
// Declares interest in keyboard and pointing-device raw input

use std::fmt;

use crate::Settings;

pub const HID_USAGE_PAGE_GENERIC: u16 = 0x01;
pub const HID_USAGE_GENERIC_MOUSE: u16 = 0x02;
pub const HID_USAGE_GENERIC_JOYSTICK: u16 = 0x04;
pub const HID_USAGE_GENERIC_GAMEPAD: u16 = 0x05;
pub const HID_USAGE_GENERIC_KEYBOARD: u16 = 0x06;

/// Keep the OS from intercepting reserved hot-key combinations
pub const RIDEV_NOHOTKEYS: u32 = 0x0000_0200;

/// One entry of the registration call (RAWINPUTDEVICE without the target window)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRequest {
    pub usage_page: u16,
    pub usage: u16,
    pub flags: u32,
}

impl DeviceRequest {
    pub fn suppresses_hotkeys(&self) -> bool {
        self.flags & RIDEV_NOHOTKEYS != 0
    }
}

impl fmt::Display for DeviceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match (self.usage_page, self.usage) {
            (HID_USAGE_PAGE_GENERIC, HID_USAGE_GENERIC_KEYBOARD) => "keyboard",
            (HID_USAGE_PAGE_GENERIC, HID_USAGE_GENERIC_MOUSE) => "mouse",
            (HID_USAGE_PAGE_GENERIC, HID_USAGE_GENERIC_JOYSTICK) => "joystick",
            (HID_USAGE_PAGE_GENERIC, HID_USAGE_GENERIC_GAMEPAD) => "gamepad",
            _ => "hid",
        };
        write!(
            f,
            "{} (page 0x{:02X}, usage 0x{:02X}, flags 0x{:08X})",
            class, self.usage_page, self.usage, self.flags
        )
    }
}

/// Registration failures. These abort input startup; there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("raw input registration failed (os error {code})")]
    Os { code: u32 },
}

/// Performs the single registration call against the OS
pub trait Registrar {
    fn register(&mut self, requests: &[DeviceRequest]) -> Result<(), RegistrationError>;
}

/// The keyboard and mouse requests, keyboard first
pub fn registration_requests(suppress_hotkeys: bool) -> [DeviceRequest; 2] {
    [
        DeviceRequest {
            usage_page: HID_USAGE_PAGE_GENERIC,
            usage: HID_USAGE_GENERIC_KEYBOARD,
            flags: if suppress_hotkeys { RIDEV_NOHOTKEYS } else { 0 },
        },
        DeviceRequest {
            usage_page: HID_USAGE_PAGE_GENERIC,
            usage: HID_USAGE_GENERIC_MOUSE,
            flags: 0,
        },
    ]
}

/// Register keyboard and mouse raw input in one call
pub fn initialize(
    registrar: &mut dyn Registrar,
    suppress_hotkeys: bool,
) -> Result<(), RegistrationError> {
    let requests = registration_requests(suppress_hotkeys);
    registrar.register(&requests).map_err(|e| {
        log::error!("raw input registration failed: {}", e);
        e
    })?;
    log::info!(
        "registered raw input for keyboard and mouse (hot-key suppression {})",
        if suppress_hotkeys { "on" } else { "off" }
    );
    Ok(())
}

/// [`initialize`] with the suppression flag taken from settings
pub fn initialize_with_settings(
    registrar: &mut dyn Registrar,
    settings: &Settings,
) -> Result<(), RegistrationError> {
    initialize(registrar, settings.ignore_windows_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRegistrar {
        calls: Vec<Vec<DeviceRequest>>,
        fail: bool,
    }

    impl Registrar for RecordingRegistrar {
        fn register(&mut self, requests: &[DeviceRequest]) -> Result<(), RegistrationError> {
            self.calls.push(requests.to_vec());
            if self.fail {
                Err(RegistrationError::Os { code: 87 })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_requests_without_suppression() {
        let [kb, mouse] = registration_requests(false);
        assert_eq!(kb.usage, HID_USAGE_GENERIC_KEYBOARD);
        assert!(!kb.suppresses_hotkeys());
        assert_eq!(mouse.usage, HID_USAGE_GENERIC_MOUSE);
        assert_eq!(mouse.flags, 0);
    }

    #[test]
    fn test_requests_with_suppression() {
        let [kb, mouse] = registration_requests(true);
        assert!(kb.suppresses_hotkeys());
        // Only the keyboard carries the flag
        assert!(!mouse.suppresses_hotkeys());
    }

    #[test]
    fn test_initialize_single_call() {
        let mut registrar = RecordingRegistrar::default();
        initialize(&mut registrar, true).unwrap();
        assert_eq!(registrar.calls.len(), 1);
        assert_eq!(registrar.calls[0].len(), 2);
        assert!(registrar.calls[0][0].suppresses_hotkeys());
    }

    #[test]
    fn test_initialize_failure_is_surfaced() {
        let mut registrar = RecordingRegistrar {
            fail: true,
            ..Default::default()
        };
        let err = initialize(&mut registrar, false).unwrap_err();
        assert!(matches!(err, RegistrationError::Os { code: 87 }));
        assert_eq!(registrar.calls.len(), 1);
    }

    #[test]
    fn test_initialize_from_settings() {
        let mut settings = Settings::new();
        settings.set_ignore_windows_key(true);
        let mut registrar = RecordingRegistrar::default();
        initialize_with_settings(&mut registrar, &settings).unwrap();
        assert!(registrar.calls[0][0].suppresses_hotkeys());
    }

    #[test]
    fn test_request_display() {
        let [kb, _] = registration_requests(true);
        assert_eq!(
            kb.to_string(),
            "keyboard (page 0x01, usage 0x06, flags 0x00000200)"
        );
    }
}
