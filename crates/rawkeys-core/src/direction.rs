use std::fmt;

/// Direction of a normalized key event.
///
/// Raw messages distinguish key-down, system-key-down and key-up; after
/// normalization only the edge remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn is_down(self) -> bool {
        matches!(self, Direction::Down)
    }

    pub fn is_up(self) -> bool {
        matches!(self, Direction::Up)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Up => write!(f, "up"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_predicates() {
        assert!(Direction::Down.is_down());
        assert!(!Direction::Down.is_up());
        assert!(Direction::Up.is_up());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(format!("{}", Direction::Down), "down");
        assert_eq!(format!("{}", Direction::Up), "up");
    }
}
