// Rawkeys Platform Backends

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use self::windows::{SystemScanCodeMap, WindowsRawInput, WindowsRegistrar};

use crate::disambiguate::ScanCodeMap;

/// Scan-code map backed by the OS where one exists
pub fn default_scan_map() -> Box<dyn ScanCodeMap + Send> {
    #[cfg(windows)]
    {
        Box::new(SystemScanCodeMap)
    }
    #[cfg(not(windows))]
    {
        Box::new(crate::disambiguate::StandardScanCodeMap)
    }
}
