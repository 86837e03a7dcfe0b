//! Keyboard input recognised by sortable rows

/// Direction of a keyboard move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Target index for a one-step move, `None` when it would leave `0..len`.
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1).filter(|&next| next < len),
        }
    }
}

/// What a key press asks the list to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Space or Enter: grab when idle, drop when grabbed
    Toggle,
    /// ArrowUp / ArrowDown
    Move(Direction),
    /// Escape
    Cancel,
    /// Delete or Backspace
    Remove,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value. Unrecognised keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Spacebar" | "Enter" => Some(KeyAction::Toggle),
            "ArrowUp" | "Up" => Some(KeyAction::Move(Direction::Up)),
            "ArrowDown" | "Down" => Some(KeyAction::Move(Direction::Down)),
            "Escape" | "Esc" => Some(KeyAction::Cancel),
            "Delete" | "Del" | "Backspace" => Some(KeyAction::Remove),
            _ => None,
        }
    }
}

/// A key press delivered to the row at some index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub action: KeyAction,
    /// The event came from a control nested inside the row (e.g. the remove
    /// button), which keeps its own Space/Enter/Delete behaviour.
    pub from_control: bool,
}

impl KeyInput {
    pub fn new(action: KeyAction) -> Self {
        Self {
            action,
            from_control: false,
        }
    }

    pub fn from_control(action: KeyAction) -> Self {
        Self {
            action,
            from_control: true,
        }
    }

    pub fn parse(key: &str, from_control: bool) -> Option<Self> {
        KeyAction::from_key(key).map(|action| Self {
            action,
            from_control,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(KeyAction::from_key(" "), Some(KeyAction::Toggle));
        assert_eq!(KeyAction::from_key("Enter"), Some(KeyAction::Toggle));
        assert_eq!(
            KeyAction::from_key("ArrowUp"),
            Some(KeyAction::Move(Direction::Up))
        );
        assert_eq!(
            KeyAction::from_key("ArrowDown"),
            Some(KeyAction::Move(Direction::Down))
        );
        assert_eq!(KeyAction::from_key("Escape"), Some(KeyAction::Cancel));
        assert_eq!(KeyAction::from_key("Delete"), Some(KeyAction::Remove));
        assert_eq!(KeyAction::from_key("Backspace"), Some(KeyAction::Remove));
        assert_eq!(KeyAction::from_key("Tab"), None);
        assert_eq!(KeyAction::from_key("a"), None);
    }

    #[test]
    fn test_step_never_wraps() {
        assert_eq!(Direction::Up.step(0, 3), None);
        assert_eq!(Direction::Up.step(2, 3), Some(1));
        assert_eq!(Direction::Down.step(2, 3), None);
        assert_eq!(Direction::Down.step(0, 3), Some(1));
        assert_eq!(Direction::Down.step(0, 0), None);
    }

    #[test]
    fn test_parse_marks_nested_controls() {
        let input = KeyInput::parse("Delete", true).unwrap();
        assert!(input.from_control);
        assert_eq!(input.action, KeyAction::Remove);
        assert!(KeyInput::parse("x", false).is_none());
    }
}
