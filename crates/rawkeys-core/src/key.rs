// Rawkeys Application Key Codes
// The key-code space normalized events are expressed in (Linux input-event-codes.h)

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Application key code carried by every normalized key event.
///
/// `Key(0)` is the reserved code and means "unmapped" throughout the
/// translation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const UNMAPPED: Key = Key(0);

    pub fn code(self) -> u16 {
        self.0
    }

    /// Whether a translation result carries a real mapping
    pub fn is_mapped(self) -> bool {
        self.0 != 0
    }

    pub fn name(self) -> &'static str {
        key_name(self.0)
    }
}

impl From<u16> for Key {
    fn from(code: u16) -> Self {
        Key(code)
    }
}

impl From<Key> for u16 {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    /// Accepts a key name (`LEFT_SHIFT`) or a numeric code (`42`, `0x2a`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(code) = parse_code(s) {
            return Ok(Key(code));
        }
        key_from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

pub(crate) fn parse_code(s: &str) -> Option<u16> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

// Named application codes referenced by the default translation table.
pub const KEY_ESC: Key = Key(1);
pub const KEY_1: Key = Key(2);
pub const KEY_0: Key = Key(11);
pub const KEY_MINUS: Key = Key(12);
pub const KEY_EQUAL: Key = Key(13);
pub const KEY_BACKSPACE: Key = Key(14);
pub const KEY_TAB: Key = Key(15);
pub const KEY_ENTER: Key = Key(28);
pub const KEY_LEFT_CTRL: Key = Key(29);
pub const KEY_A: Key = Key(30);
pub const KEY_LEFT_SHIFT: Key = Key(42);
pub const KEY_RIGHT_SHIFT: Key = Key(54);
pub const KEY_LEFT_ALT: Key = Key(56);
pub const KEY_SPACE: Key = Key(57);
pub const KEY_CAPSLOCK: Key = Key(58);
pub const KEY_F1: Key = Key(59);
pub const KEY_RIGHT_CTRL: Key = Key(97);
pub const KEY_RIGHT_ALT: Key = Key(100);
pub const KEY_LEFT_META: Key = Key(125);
pub const KEY_RIGHT_META: Key = Key(126);
pub const BTN_LEFT: Key = Key(0x110);
pub const BTN_RIGHT: Key = Key(0x111);
pub const BTN_MIDDLE: Key = Key(0x112);
pub const BTN_SIDE: Key = Key(0x113);
pub const BTN_EXTRA: Key = Key(0x114);

const KEY_NAMES: &[(u16, &str)] = &[
    (0, "RESERVED"),
    (1, "ESC"),
    (2, "KEY_1"),
    (3, "KEY_2"),
    (4, "KEY_3"),
    (5, "KEY_4"),
    (6, "KEY_5"),
    (7, "KEY_6"),
    (8, "KEY_7"),
    (9, "KEY_8"),
    (10, "KEY_9"),
    (11, "KEY_0"),
    (12, "MINUS"),
    (13, "EQUAL"),
    (14, "BACKSPACE"),
    (15, "TAB"),
    (16, "Q"),
    (17, "W"),
    (18, "E"),
    (19, "R"),
    (20, "T"),
    (21, "Y"),
    (22, "U"),
    (23, "I"),
    (24, "O"),
    (25, "P"),
    (26, "LEFT_BRACE"),
    (27, "RIGHT_BRACE"),
    (28, "ENTER"),
    (29, "LEFT_CTRL"),
    (30, "A"),
    (31, "S"),
    (32, "D"),
    (33, "F"),
    (34, "G"),
    (35, "H"),
    (36, "J"),
    (37, "K"),
    (38, "L"),
    (39, "SEMICOLON"),
    (40, "APOSTROPHE"),
    (41, "GRAVE"),
    (42, "LEFT_SHIFT"),
    (43, "BACKSLASH"),
    (44, "Z"),
    (45, "X"),
    (46, "C"),
    (47, "V"),
    (48, "B"),
    (49, "N"),
    (50, "M"),
    (51, "COMMA"),
    (52, "DOT"),
    (53, "SLASH"),
    (54, "RIGHT_SHIFT"),
    (55, "KPASTERISK"),
    (56, "LEFT_ALT"),
    (57, "SPACE"),
    (58, "CAPSLOCK"),
    (59, "F1"),
    (60, "F2"),
    (61, "F3"),
    (62, "F4"),
    (63, "F5"),
    (64, "F6"),
    (65, "F7"),
    (66, "F8"),
    (67, "F9"),
    (68, "F10"),
    (69, "NUMLOCK"),
    (70, "SCROLLLOCK"),
    (71, "KP7"),
    (72, "KP8"),
    (73, "KP9"),
    (74, "KPMINUS"),
    (75, "KP4"),
    (76, "KP5"),
    (77, "KP6"),
    (78, "KPPLUS"),
    (79, "KP1"),
    (80, "KP2"),
    (81, "KP3"),
    (82, "KP0"),
    (83, "KPDOT"),
    (86, "KEY_102ND"),
    (87, "F11"),
    (88, "F12"),
    (96, "KPENTER"),
    (97, "RIGHT_CTRL"),
    (98, "KPSLASH"),
    (99, "SYSRQ"),
    (100, "RIGHT_ALT"),
    (102, "HOME"),
    (103, "UP"),
    (104, "PAGE_UP"),
    (105, "LEFT"),
    (106, "RIGHT"),
    (107, "END"),
    (108, "DOWN"),
    (109, "PAGE_DOWN"),
    (110, "INSERT"),
    (111, "DELETE"),
    (113, "MUTE"),
    (114, "VOLUMEDOWN"),
    (115, "VOLUMEUP"),
    (119, "PAUSE"),
    (125, "LEFT_META"),
    (126, "RIGHT_META"),
    (127, "COMPOSE"),
    (163, "NEXTSONG"),
    (164, "PLAYPAUSE"),
    (165, "PREVIOUSSONG"),
    (166, "STOPCD"),
    (0x110, "BTN_LEFT"),
    (0x111, "BTN_RIGHT"),
    (0x112, "BTN_MIDDLE"),
    (0x113, "BTN_SIDE"),
    (0x114, "BTN_EXTRA"),
];

fn name_index() -> &'static HashMap<u16, &'static str> {
    static BY_CODE: OnceLock<HashMap<u16, &'static str>> = OnceLock::new();
    BY_CODE.get_or_init(|| KEY_NAMES.iter().copied().collect())
}

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    name_index().get(&code).copied().unwrap_or("UNKNOWN")
}

/// Reverse lookup, case-insensitive
pub fn key_from_name(name: &str) -> Option<Key> {
    let wanted = name.trim().to_ascii_uppercase();
    KEY_NAMES
        .iter()
        .find(|(_, n)| *n == wanted)
        .map(|(code, _)| Key(*code))
}
