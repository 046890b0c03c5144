// Rawkeys Key Translation
// Fixed virtual-key -> application key table

use std::fmt;

use crate::key::*;
use crate::{Key, VirtualKey};

/// Maps device virtual-key codes to application key codes.
///
/// Entries left at [`Key::UNMAPPED`] mean "ignore": the decoder drops such
/// keys before they reach the held-key set or the sink.
#[derive(Clone)]
pub struct TranslationTable {
    entries: [Key; VirtualKey::COUNT],
}

impl TranslationTable {
    /// A table with every entry unmapped
    pub fn empty() -> Self {
        Self {
            entries: [Key::UNMAPPED; VirtualKey::COUNT],
        }
    }

    /// Look up a virtual key; out-of-range codes are unmapped
    pub fn translate(&self, vk: VirtualKey) -> Key {
        vk.index()
            .map(|idx| self.entries[idx])
            .unwrap_or(Key::UNMAPPED)
    }

    /// Like [`translate`](Self::translate) but `None` for unmapped codes
    pub fn lookup(&self, vk: VirtualKey) -> Option<Key> {
        Some(self.translate(vk)).filter(|key| key.is_mapped())
    }

    /// Set one entry. Returns false if `vk` is outside the table.
    pub fn set(&mut self, vk: VirtualKey, key: Key) -> bool {
        match vk.index() {
            Some(idx) => {
                self.entries[idx] = key;
                true
            }
            None => false,
        }
    }

    /// Number of mapped entries
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|k| k.is_mapped()).count()
    }

    /// Iterate over mapped `(virtual key, key)` pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (VirtualKey, Key)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, key)| key.is_mapped())
            .map(|(idx, key)| (VirtualKey(idx as u16), *key))
    }
}

// US layout letter row order: VK 'A'..='Z' in alphabetical order.
const LETTERS: [u16; 26] = [
    30, 48, 46, 32, 18, 33, 34, 35, 23, 36, 37, 38, 50, 49, 24, 25, 16, 19, 31, 20, 22, 47,
    17, 45, 21, 44,
];

// VK_NUMPAD0..=VK_NUMPAD9
const NUMPAD: [u16; 10] = [82, 79, 80, 81, 75, 76, 77, 71, 72, 73];

const NAMED: &[(VirtualKey, Key)] = &[
    (VirtualKey::LBUTTON, BTN_LEFT),
    (VirtualKey::RBUTTON, BTN_RIGHT),
    (VirtualKey::MBUTTON, BTN_MIDDLE),
    (VirtualKey::XBUTTON1, BTN_SIDE),
    (VirtualKey::XBUTTON2, BTN_EXTRA),
    (VirtualKey::BACK, KEY_BACKSPACE),
    (VirtualKey::TAB, KEY_TAB),
    (VirtualKey::RETURN, KEY_ENTER),
    (VirtualKey::PAUSE, Key(119)),
    (VirtualKey::CAPITAL, KEY_CAPSLOCK),
    (VirtualKey::ESCAPE, KEY_ESC),
    (VirtualKey::SPACE, KEY_SPACE),
    (VirtualKey::PRIOR, Key(104)),
    (VirtualKey::NEXT, Key(109)),
    (VirtualKey::END, Key(107)),
    (VirtualKey::HOME, Key(102)),
    (VirtualKey::LEFT, Key(105)),
    (VirtualKey::UP, Key(103)),
    (VirtualKey::RIGHT, Key(106)),
    (VirtualKey::DOWN, Key(108)),
    (VirtualKey::SNAPSHOT, Key(99)),
    (VirtualKey::INSERT, Key(110)),
    (VirtualKey::DELETE, Key(111)),
    (VirtualKey::LWIN, KEY_LEFT_META),
    (VirtualKey::RWIN, KEY_RIGHT_META),
    (VirtualKey::APPS, Key(127)),
    (VirtualKey::MULTIPLY, Key(55)),
    (VirtualKey::ADD, Key(78)),
    (VirtualKey::SUBTRACT, Key(74)),
    (VirtualKey::DECIMAL, Key(83)),
    (VirtualKey::DIVIDE, Key(98)),
    (VirtualKey::NUMLOCK, Key(69)),
    (VirtualKey::SCROLL, Key(70)),
    (VirtualKey::LSHIFT, KEY_LEFT_SHIFT),
    (VirtualKey::RSHIFT, KEY_RIGHT_SHIFT),
    (VirtualKey::LCONTROL, KEY_LEFT_CTRL),
    (VirtualKey::RCONTROL, KEY_RIGHT_CTRL),
    (VirtualKey::LMENU, KEY_LEFT_ALT),
    (VirtualKey::RMENU, KEY_RIGHT_ALT),
    (VirtualKey::VOLUME_MUTE, Key(113)),
    (VirtualKey::VOLUME_DOWN, Key(114)),
    (VirtualKey::VOLUME_UP, Key(115)),
    (VirtualKey::MEDIA_NEXT_TRACK, Key(163)),
    (VirtualKey::MEDIA_PREV_TRACK, Key(165)),
    (VirtualKey::MEDIA_STOP, Key(166)),
    (VirtualKey::MEDIA_PLAY_PAUSE, Key(164)),
    (VirtualKey::OEM_1, Key(39)),
    (VirtualKey::OEM_PLUS, KEY_EQUAL),
    (VirtualKey::OEM_COMMA, Key(51)),
    (VirtualKey::OEM_MINUS, KEY_MINUS),
    (VirtualKey::OEM_PERIOD, Key(52)),
    (VirtualKey::OEM_2, Key(53)),
    (VirtualKey::OEM_3, Key(41)),
    (VirtualKey::OEM_4, Key(26)),
    (VirtualKey::OEM_5, Key(43)),
    (VirtualKey::OEM_6, Key(27)),
    (VirtualKey::OEM_7, Key(40)),
    (VirtualKey::OEM_102, Key(86)),
];

impl Default for TranslationTable {
    /// US keyboard layout plus the five standard mouse buttons.
    ///
    /// The generic Shift/Control/Alt codes stay unmapped since they are
    /// always resolved to a side before lookup.
    fn default() -> Self {
        let mut table = Self::empty();

        for (offset, code) in LETTERS.iter().enumerate() {
            table.set(VirtualKey(VirtualKey::KEY_A.0 + offset as u16), Key(*code));
        }

        // '0' sits after '9' in the application code space
        table.set(VirtualKey::KEY_0, KEY_0);
        for digit in 1..=9u16 {
            table.set(
                VirtualKey(VirtualKey::KEY_0.0 + digit),
                Key(KEY_1.0 + digit - 1),
            );
        }

        for (offset, code) in NUMPAD.iter().enumerate() {
            table.set(VirtualKey(VirtualKey::NUMPAD0.0 + offset as u16), Key(*code));
        }

        for n in 0..10u16 {
            table.set(VirtualKey(VirtualKey::F1.0 + n), Key(KEY_F1.0 + n));
        }
        table.set(VirtualKey(VirtualKey::F1.0 + 10), Key(87));
        table.set(VirtualKey(VirtualKey::F1.0 + 11), Key(88));

        for (vk, key) in NAMED {
            table.set(*vk, *key);
        }

        table
    }
}

impl fmt::Debug for TranslationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationTable")
            .field("mapped", &self.mapped_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_maps_nothing() {
        let table = TranslationTable::empty();
        assert_eq!(table.mapped_count(), 0);
        assert_eq!(table.translate(VirtualKey::KEY_A), Key::UNMAPPED);
        assert_eq!(table.lookup(VirtualKey::KEY_A), None);
    }

    #[test]
    fn test_default_letters_and_digits() {
        let table = TranslationTable::default();
        assert_eq!(table.translate(VirtualKey::KEY_A), KEY_A);
        assert_eq!(table.translate(VirtualKey(0x5A)), Key(44)); // Z
        assert_eq!(table.translate(VirtualKey(0x51)), Key(16)); // Q
        assert_eq!(table.translate(VirtualKey::KEY_0), KEY_0);
        assert_eq!(table.translate(VirtualKey(0x31)), KEY_1);
        assert_eq!(table.translate(VirtualKey(0x39)), Key(10));
    }

    #[test]
    fn test_default_function_keys() {
        let table = TranslationTable::default();
        assert_eq!(table.translate(VirtualKey::F1), KEY_F1);
        assert_eq!(table.translate(VirtualKey(0x79)), Key(68)); // F10
        assert_eq!(table.translate(VirtualKey(0x7B)), Key(88)); // F12
    }

    #[test]
    fn test_default_sided_modifiers() {
        let table = TranslationTable::default();
        assert_eq!(table.translate(VirtualKey::LSHIFT), KEY_LEFT_SHIFT);
        assert_eq!(table.translate(VirtualKey::RSHIFT), KEY_RIGHT_SHIFT);
        assert_eq!(table.translate(VirtualKey::RCONTROL), KEY_RIGHT_CTRL);
        assert_eq!(table.translate(VirtualKey::RMENU), KEY_RIGHT_ALT);
        // Generic codes never reach the table after disambiguation
        assert_eq!(table.translate(VirtualKey::SHIFT), Key::UNMAPPED);
    }

    #[test]
    fn test_default_mouse_buttons() {
        let table = TranslationTable::default();
        assert_eq!(table.translate(VirtualKey::RBUTTON), BTN_RIGHT);
        assert_eq!(table.translate(VirtualKey::LBUTTON), BTN_LEFT);
    }

    #[test]
    fn test_index_zero_is_unmapped() {
        let table = TranslationTable::default();
        assert_eq!(table.translate(VirtualKey(0)), Key::UNMAPPED);
    }

    #[test]
    fn test_set_and_out_of_range() {
        let mut table = TranslationTable::empty();
        assert!(table.set(VirtualKey::SPACE, KEY_ENTER));
        assert_eq!(table.lookup(VirtualKey::SPACE), Some(KEY_ENTER));
        assert!(!table.set(VirtualKey(0x1FF), KEY_ENTER));
        assert_eq!(table.translate(VirtualKey(0x1FF)), Key::UNMAPPED);
    }

    #[test]
    fn test_iter_in_code_order() {
        let mut table = TranslationTable::empty();
        table.set(VirtualKey::SPACE, KEY_SPACE);
        table.set(VirtualKey::BACK, KEY_BACKSPACE);
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(
            pairs,
            vec![(VirtualKey::BACK, KEY_BACKSPACE), (VirtualKey::SPACE, KEY_SPACE)]
        );
    }
}
