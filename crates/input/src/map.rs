//! Key mapping from terminal events to game controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A logical control the game samples once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Pause,
    Quit,
}

impl Control {
    /// Controls that are sampled as held state (everything except quit).
    pub const HELD: [Control; 5] = [
        Control::MoveLeft,
        Control::MoveRight,
        Control::SoftDrop,
        Control::Rotate,
        Control::Pause,
    ];

    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            Control::MoveLeft => Some(0),
            Control::MoveRight => Some(1),
            Control::SoftDrop => Some(2),
            Control::Rotate => Some(3),
            Control::Pause => Some(4),
            Control::Quit => None,
        }
    }
}

/// Map a keyboard event to a control.
pub fn map_key(key: KeyEvent) -> Option<Control> {
    if should_quit(key) {
        return Some(Control::Quit);
    }
    match key.code {
        KeyCode::Left => Some(Control::MoveLeft),
        KeyCode::Right => Some(Control::MoveRight),
        KeyCode::Down => Some(Control::SoftDrop),
        KeyCode::Up | KeyCode::Char(' ') => Some(Control::Rotate),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Control::Pause),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
