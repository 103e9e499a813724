use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Logical action decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Direction(Direction),
    /// Enter: start from the menu, restart after game over
    Confirm,
    TogglePause,
    ToggleGodmode,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Direction(Direction::Up),
            KeyCode::Down => KeyAction::Direction(Direction::Down),
            KeyCode::Left => KeyAction::Direction(Direction::Left),
            KeyCode::Right => KeyAction::Direction(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Direction(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Direction(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Direction(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Direction(Direction::Right),

            // Controls
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePause,
            KeyCode::Char('g') | KeyCode::Char('G') => KeyAction::ToggleGodmode,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
