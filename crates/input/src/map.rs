//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game command.
///
/// Keys outside the binding table return `None` and never reach the session.
pub fn map_key_event(key: KeyEvent) -> Option<GameCommand> {
    match key.code {
        // Lifecycle
        KeyCode::Enter => Some(GameCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Reset),

        // Movement
        KeyCode::Left => Some(GameCommand::MoveLeft),
        KeyCode::Right => Some(GameCommand::MoveRight),
        KeyCode::Down => Some(GameCommand::MoveDown),
        KeyCode::Char(' ') => Some(GameCommand::HardDrop),

        // Rotation
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameCommand::RotateCw),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameCommand::RotateCcw),

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Short human-readable name of a key, shown in the debug overlay.
pub fn key_label(key: KeyEvent) -> String {
    match key.code {
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "other".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameCommand::MoveLeft)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameCommand::MoveRight)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameCommand::MoveDown)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameCommand::HardDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('m'))),
            Some(GameCommand::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('M'))),
            Some(GameCommand::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('n'))),
            Some(GameCommand::RotateCcw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('N'))),
            Some(GameCommand::RotateCcw)
        );
    }

    #[test]
    fn test_lifecycle_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(GameCommand::TogglePause)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameCommand::Reset)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(GameCommand::Reset)
        );
    }

    #[test]
    fn test_unbound_keys_are_dropped() {
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Up)), None);
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Esc)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(KeyEvent::from(KeyCode::Left)), "ArrowLeft");
        assert_eq!(key_label(KeyEvent::from(KeyCode::Char(' '))), "Space");
        assert_eq!(key_label(KeyEvent::from(KeyCode::Char('n'))), "n");
        assert_eq!(key_label(KeyEvent::from(KeyCode::F(5))), "F5");
    }
}
