// Rawkeys Virtual Keys
// Device virtual-key codes as reported by the raw keyboard payload

use std::fmt;

/// A device virtual-key code.
///
/// The domain is bounded to a single byte; the translation table is indexed
/// directly by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VirtualKey(pub u16);

impl VirtualKey {
    /// Number of addressable virtual-key codes
    pub const COUNT: usize = 256;

    pub const LBUTTON: VirtualKey = VirtualKey(0x01);
    pub const RBUTTON: VirtualKey = VirtualKey(0x02);
    pub const MBUTTON: VirtualKey = VirtualKey(0x04);
    pub const XBUTTON1: VirtualKey = VirtualKey(0x05);
    pub const XBUTTON2: VirtualKey = VirtualKey(0x06);
    pub const BACK: VirtualKey = VirtualKey(0x08);
    pub const TAB: VirtualKey = VirtualKey(0x09);
    pub const RETURN: VirtualKey = VirtualKey(0x0D);
    /// Generic Shift, reported for both physical Shift keys
    pub const SHIFT: VirtualKey = VirtualKey(0x10);
    /// Generic Control, reported for both physical Control keys
    pub const CONTROL: VirtualKey = VirtualKey(0x11);
    /// Generic Alt, reported for both physical Alt keys
    pub const MENU: VirtualKey = VirtualKey(0x12);
    pub const PAUSE: VirtualKey = VirtualKey(0x13);
    pub const CAPITAL: VirtualKey = VirtualKey(0x14);
    pub const ESCAPE: VirtualKey = VirtualKey(0x1B);
    pub const SPACE: VirtualKey = VirtualKey(0x20);
    pub const PRIOR: VirtualKey = VirtualKey(0x21);
    pub const NEXT: VirtualKey = VirtualKey(0x22);
    pub const END: VirtualKey = VirtualKey(0x23);
    pub const HOME: VirtualKey = VirtualKey(0x24);
    pub const LEFT: VirtualKey = VirtualKey(0x25);
    pub const UP: VirtualKey = VirtualKey(0x26);
    pub const RIGHT: VirtualKey = VirtualKey(0x27);
    pub const DOWN: VirtualKey = VirtualKey(0x28);
    pub const SNAPSHOT: VirtualKey = VirtualKey(0x2C);
    pub const INSERT: VirtualKey = VirtualKey(0x2D);
    pub const DELETE: VirtualKey = VirtualKey(0x2E);
    pub const KEY_0: VirtualKey = VirtualKey(0x30);
    pub const KEY_A: VirtualKey = VirtualKey(0x41);
    pub const LWIN: VirtualKey = VirtualKey(0x5B);
    pub const RWIN: VirtualKey = VirtualKey(0x5C);
    pub const APPS: VirtualKey = VirtualKey(0x5D);
    pub const NUMPAD0: VirtualKey = VirtualKey(0x60);
    pub const MULTIPLY: VirtualKey = VirtualKey(0x6A);
    pub const ADD: VirtualKey = VirtualKey(0x6B);
    pub const SUBTRACT: VirtualKey = VirtualKey(0x6D);
    pub const DECIMAL: VirtualKey = VirtualKey(0x6E);
    pub const DIVIDE: VirtualKey = VirtualKey(0x6F);
    pub const F1: VirtualKey = VirtualKey(0x70);
    pub const NUMLOCK: VirtualKey = VirtualKey(0x90);
    pub const SCROLL: VirtualKey = VirtualKey(0x91);
    pub const LSHIFT: VirtualKey = VirtualKey(0xA0);
    pub const RSHIFT: VirtualKey = VirtualKey(0xA1);
    pub const LCONTROL: VirtualKey = VirtualKey(0xA2);
    pub const RCONTROL: VirtualKey = VirtualKey(0xA3);
    pub const LMENU: VirtualKey = VirtualKey(0xA4);
    pub const RMENU: VirtualKey = VirtualKey(0xA5);
    pub const VOLUME_MUTE: VirtualKey = VirtualKey(0xAD);
    pub const VOLUME_DOWN: VirtualKey = VirtualKey(0xAE);
    pub const VOLUME_UP: VirtualKey = VirtualKey(0xAF);
    pub const MEDIA_NEXT_TRACK: VirtualKey = VirtualKey(0xB0);
    pub const MEDIA_PREV_TRACK: VirtualKey = VirtualKey(0xB1);
    pub const MEDIA_STOP: VirtualKey = VirtualKey(0xB2);
    pub const MEDIA_PLAY_PAUSE: VirtualKey = VirtualKey(0xB3);
    pub const OEM_1: VirtualKey = VirtualKey(0xBA);
    pub const OEM_PLUS: VirtualKey = VirtualKey(0xBB);
    pub const OEM_COMMA: VirtualKey = VirtualKey(0xBC);
    pub const OEM_MINUS: VirtualKey = VirtualKey(0xBD);
    pub const OEM_PERIOD: VirtualKey = VirtualKey(0xBE);
    pub const OEM_2: VirtualKey = VirtualKey(0xBF);
    pub const OEM_3: VirtualKey = VirtualKey(0xC0);
    pub const OEM_4: VirtualKey = VirtualKey(0xDB);
    pub const OEM_5: VirtualKey = VirtualKey(0xDC);
    pub const OEM_6: VirtualKey = VirtualKey(0xDD);
    pub const OEM_7: VirtualKey = VirtualKey(0xDE);
    pub const OEM_102: VirtualKey = VirtualKey(0xE2);

    pub fn code(self) -> u16 {
        self.0
    }

    /// Table index, or `None` when the code falls outside the bounded domain
    pub fn index(self) -> Option<usize> {
        let idx = self.0 as usize;
        (idx < Self::COUNT).then_some(idx)
    }
}

impl From<u16> for VirtualKey {
    fn from(code: u16) -> Self {
        VirtualKey(code)
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VK(0x{:02X})", self.0)
    }
}
