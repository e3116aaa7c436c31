//! Key mapping from terminal events to controls.

use crate::types::{Direction, RotationDirection};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A bound key's meaning, before press/release tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Held: steps sideways while down
    Move(Direction),
    /// Held: zero gravity while down
    Rush,
    Rotate(RotationDirection),
    HardDrop,
    Pause,
    Restart,
}

impl Control {
    /// Whether the control has a held state with a release edge
    pub fn is_held(&self) -> bool {
        matches!(self, Control::Move(_) | Control::Rush)
    }
}

/// Map a key code to a control.
pub fn map_key(code: KeyCode) -> Option<Control> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Control::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Control::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Control::Rush)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Control::Rotate(RotationDirection::Clockwise)),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(Control::Rotate(RotationDirection::CounterClockwise)),

        KeyCode::Char(' ') => Some(Control::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Control::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Control::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
