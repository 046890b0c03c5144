// Rawkeys Pointer Handling
// Relative motion accumulation and per-button edge detection

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::raw::payload::*;
use crate::raw::MousePayload;
use crate::{Direction, VirtualKey};

/// Unconsumed relative pointer movement.
///
/// Every pointer payload adds to it; a per-frame consumer drains it with
/// [`take`](Self::take). Saturates instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerMotion {
    dx: i32,
    dy: i32,
}

impl PointerMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, dx: i32, dy: i32) {
        self.dx = self.dx.saturating_add(dx);
        self.dy = self.dy.saturating_add(dy);
    }

    /// Pending movement without draining it
    pub fn delta(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// Drain the pending movement
    pub fn take(&mut self) -> (i32, i32) {
        let delta = self.delta();
        self.reset();
        delta
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// A pointer button the decoder can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

impl PointerButton {
    /// RI_MOUSE_* bit for the press transition
    pub fn down_flag(self) -> u16 {
        match self {
            PointerButton::Left => RI_MOUSE_LEFT_BUTTON_DOWN,
            PointerButton::Right => RI_MOUSE_RIGHT_BUTTON_DOWN,
            PointerButton::Middle => RI_MOUSE_MIDDLE_BUTTON_DOWN,
            PointerButton::X1 => RI_MOUSE_BUTTON_4_DOWN,
            PointerButton::X2 => RI_MOUSE_BUTTON_5_DOWN,
        }
    }

    /// RI_MOUSE_* bit for the release transition
    pub fn up_flag(self) -> u16 {
        match self {
            PointerButton::Left => RI_MOUSE_LEFT_BUTTON_UP,
            PointerButton::Right => RI_MOUSE_RIGHT_BUTTON_UP,
            PointerButton::Middle => RI_MOUSE_MIDDLE_BUTTON_UP,
            PointerButton::X1 => RI_MOUSE_BUTTON_4_UP,
            PointerButton::X2 => RI_MOUSE_BUTTON_5_UP,
        }
    }

    /// Virtual key used for translation
    pub fn virtual_key(self) -> VirtualKey {
        match self {
            PointerButton::Left => VirtualKey::LBUTTON,
            PointerButton::Right => VirtualKey::RBUTTON,
            PointerButton::Middle => VirtualKey::MBUTTON,
            PointerButton::X1 => VirtualKey::XBUTTON1,
            PointerButton::X2 => VirtualKey::XBUTTON2,
        }
    }

    /// Transition carried by one payload, if any.
    ///
    /// Down and up bits are exclusive per message; if both appear the press wins.
    pub fn edge(self, payload: &MousePayload) -> Option<Direction> {
        if payload.has_flag(self.down_flag()) {
            Some(Direction::Down)
        } else if payload.has_flag(self.up_flag()) {
            Some(Direction::Up)
        } else {
            None
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of pointer buttons a device class reports.
///
/// The default handles the right button only; other buttons are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonCapabilities {
    mask: u8,
}

impl ButtonCapabilities {
    pub fn none() -> Self {
        Self { mask: 0 }
    }

    pub fn all() -> Self {
        PointerButton::iter().collect()
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.mask |= button.bit();
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        self.mask & button.bit() != 0
    }

    /// Handled buttons in declaration order
    pub fn iter(&self) -> impl Iterator<Item = PointerButton> + '_ {
        PointerButton::iter().filter(|b| self.contains(*b))
    }

    /// Transitions of handled buttons in a payload, in declaration order
    pub fn edges<'a>(
        &'a self,
        payload: &'a MousePayload,
    ) -> impl Iterator<Item = (PointerButton, Direction)> + 'a {
        self.iter()
            .filter_map(move |button| button.edge(payload).map(|dir| (button, dir)))
    }
}

impl Default for ButtonCapabilities {
    fn default() -> Self {
        Self::none().with(PointerButton::Right)
    }
}

impl FromIterator<PointerButton> for ButtonCapabilities {
    fn from_iter<I: IntoIterator<Item = PointerButton>>(iter: I) -> Self {
        let mut caps = Self::none();
        for button in iter {
            caps.insert(button);
        }
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_motion_accumulates_and_drains() {
        let mut motion = PointerMotion::new();
        motion.accumulate(3, -2);
        motion.accumulate(4, 5);
        assert_eq!(motion.delta(), (7, 3));
        assert_eq!(motion.take(), (7, 3));
        assert!(motion.is_zero());
    }

    #[test]
    fn test_motion_saturates() {
        let mut motion = PointerMotion::new();
        motion.accumulate(i32::MAX, i32::MIN);
        motion.accumulate(10, -10);
        assert_eq!(motion.delta(), (i32::MAX, i32::MIN));
    }

    #[test]
    fn test_right_button_edges() {
        let down = MousePayload::default().with_buttons(RI_MOUSE_RIGHT_BUTTON_DOWN);
        let up = MousePayload::default().with_buttons(RI_MOUSE_RIGHT_BUTTON_UP);
        let none = MousePayload::motion(1, 1);

        assert_eq!(PointerButton::Right.edge(&down), Some(Direction::Down));
        assert_eq!(PointerButton::Right.edge(&up), Some(Direction::Up));
        assert_eq!(PointerButton::Right.edge(&none), None);
        assert_eq!(PointerButton::Left.edge(&down), None);
    }

    #[test]
    fn test_default_capabilities_right_only() {
        let caps = ButtonCapabilities::default();
        assert!(caps.contains(PointerButton::Right));
        assert!(!caps.contains(PointerButton::Left));
        assert_eq!(caps.iter().collect::<Vec<_>>(), vec![PointerButton::Right]);
    }

    #[test]
    fn test_default_capabilities_ignore_left_click() {
        let caps = ButtonCapabilities::default();
        let payload = MousePayload::default().with_buttons(RI_MOUSE_LEFT_BUTTON_DOWN);
        assert_eq!(caps.edges(&payload).count(), 0);
    }

    #[test]
    fn test_edges_in_declaration_order() {
        let caps = ButtonCapabilities::all();
        let payload = MousePayload::default()
            .with_buttons(RI_MOUSE_MIDDLE_BUTTON_UP | RI_MOUSE_LEFT_BUTTON_DOWN);
        let edges: Vec<_> = caps.edges(&payload).collect();
        assert_eq!(
            edges,
            vec![
                (PointerButton::Left, Direction::Down),
                (PointerButton::Middle, Direction::Up),
            ]
        );
    }

    #[test]
    fn test_button_parse() {
        assert_eq!(PointerButton::from_str("Right"), Ok(PointerButton::Right));
        assert_eq!(PointerButton::from_str("x2"), Ok(PointerButton::X2));
        assert!(PointerButton::from_str("wheel").is_err());
    }

    #[test]
    fn test_button_virtual_keys() {
        assert_eq!(PointerButton::Right.virtual_key(), VirtualKey::RBUTTON);
        assert_eq!(PointerButton::X1.virtual_key(), VirtualKey::XBUTTON1);
    }
}
