// Rawkeys Key Disambiguation
// Resolves generic modifier codes into the physical left/right key

use crate::VirtualKey;

/// Maps a hardware scan code to a side-specific virtual key.
///
/// On Windows this is `MapVirtualKey(.., MAPVK_VSC_TO_VK_EX)`; elsewhere the
/// pure [`StandardScanCodeMap`] stands in.
pub trait ScanCodeMap {
    /// Returns `VirtualKey(0)` when the scan code has no mapping.
    fn scan_to_virtual_key(&self, make_code: u16) -> VirtualKey;
}

/// Set-1 scan code table covering the keys the OS reports ambiguously.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScanCodeMap;

impl StandardScanCodeMap {
    const LEFT_SHIFT: u16 = 0x2A;
    const RIGHT_SHIFT: u16 = 0x36;
    const CONTROL: u16 = 0x1D;
    const ALT: u16 = 0x38;
}

impl ScanCodeMap for StandardScanCodeMap {
    fn scan_to_virtual_key(&self, make_code: u16) -> VirtualKey {
        // Without the E0 prefix the extended variants are not recoverable,
        // so Control and Alt map to their left side like the OS does.
        match make_code {
            Self::LEFT_SHIFT => VirtualKey::LSHIFT,
            Self::RIGHT_SHIFT => VirtualKey::RSHIFT,
            Self::CONTROL => VirtualKey::LCONTROL,
            Self::ALT => VirtualKey::LMENU,
            _ => VirtualKey(0),
        }
    }
}

/// Resolve an OS-reported key into the distinguishable physical key.
///
/// Shift is told apart by scan code, Control and Alt by the E0 prefix flag.
/// Every other code passes through unchanged. Pure: no state is touched.
pub fn resolve_true_key(
    generic: VirtualKey,
    make_code: u16,
    extended: bool,
    scan_map: &dyn ScanCodeMap,
) -> VirtualKey {
    match generic {
        VirtualKey::SHIFT => scan_map.scan_to_virtual_key(make_code),
        VirtualKey::CONTROL if extended => VirtualKey::RCONTROL,
        VirtualKey::CONTROL => VirtualKey::LCONTROL,
        // Right Alt is AltGr on many layouts
        VirtualKey::MENU if extended => VirtualKey::RMENU,
        VirtualKey::MENU => VirtualKey::LMENU,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_uses_scan_code() {
        let map = StandardScanCodeMap;
        assert_eq!(resolve_true_key(VirtualKey::SHIFT, 0x2A, false, &map), VirtualKey::LSHIFT);
        assert_eq!(resolve_true_key(VirtualKey::SHIFT, 0x36, false, &map), VirtualKey::RSHIFT);
    }

    #[test]
    fn test_shift_ignores_extended_flag() {
        let map = StandardScanCodeMap;
        assert_eq!(resolve_true_key(VirtualKey::SHIFT, 0x2A, true, &map), VirtualKey::LSHIFT);
        assert_eq!(resolve_true_key(VirtualKey::SHIFT, 0x36, true, &map), VirtualKey::RSHIFT);
    }

    #[test]
    fn test_control_uses_extended_flag() {
        let map = StandardScanCodeMap;
        assert_eq!(resolve_true_key(VirtualKey::CONTROL, 0x1D, false, &map), VirtualKey::LCONTROL);
        assert_eq!(resolve_true_key(VirtualKey::CONTROL, 0x1D, true, &map), VirtualKey::RCONTROL);
    }

    #[test]
    fn test_alt_uses_extended_flag() {
        let map = StandardScanCodeMap;
        assert_eq!(resolve_true_key(VirtualKey::MENU, 0x38, false, &map), VirtualKey::LMENU);
        assert_eq!(resolve_true_key(VirtualKey::MENU, 0x38, true, &map), VirtualKey::RMENU);
    }

    #[test]
    fn test_other_keys_pass_through() {
        let map = StandardScanCodeMap;
        assert_eq!(resolve_true_key(VirtualKey::KEY_A, 0x1E, false, &map), VirtualKey::KEY_A);
        // Extended arrow keys keep their code
        assert_eq!(resolve_true_key(VirtualKey::LEFT, 0x4B, true, &map), VirtualKey::LEFT);
    }

    #[test]
    fn test_unknown_shift_scan_code() {
        let map = StandardScanCodeMap;
        assert_eq!(resolve_true_key(VirtualKey::SHIFT, 0x7F, false, &map), VirtualKey(0));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let map = StandardScanCodeMap;
        for (vk, make, ext) in [
            (VirtualKey::SHIFT, 0x36, false),
            (VirtualKey::CONTROL, 0x1D, true),
            (VirtualKey::MENU, 0x38, false),
            (VirtualKey::SPACE, 0x39, false),
        ] {
            let first = resolve_true_key(vk, make, ext, &map);
            let second = resolve_true_key(vk, make, ext, &map);
            assert_eq!(first, second);
        }
    }
}
