//! Key mapping from terminal events to engine commands.

use crate::types::{Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Letter bindings: vi keys and WASD both work, case-insensitively.
const LETTERS: [(char, Command); 9] = [
    ('h', Command::Move(Direction::Left)),
    ('a', Command::Move(Direction::Left)),
    ('l', Command::Move(Direction::Right)),
    ('d', Command::Move(Direction::Right)),
    ('j', Command::Move(Direction::Down)),
    ('s', Command::Move(Direction::Down)),
    ('k', Command::Rotate),
    ('w', Command::Rotate),
    (' ', Command::HardDrop),
];

/// Map keyboard input to a command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let c = c.to_ascii_lowercase();
            LETTERS
                .iter()
                .find(|(bound, _)| *bound == c)
                .map(|&(_, command)| command)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        let left = Some(Command::Move(Direction::Left));
        let right = Some(Command::Move(Direction::Right));
        let down = Some(Command::Move(Direction::Down));

        assert_eq!(key(KeyCode::Left), left);
        assert_eq!(key(KeyCode::Char('H')), left);
        assert_eq!(key(KeyCode::Char('a')), left);
        assert_eq!(key(KeyCode::Right), right);
        assert_eq!(key(KeyCode::Char('d')), right);
        assert_eq!(key(KeyCode::Down), down);
        assert_eq!(key(KeyCode::Char('S')), down);
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        assert_eq!(key(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char('W')), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(key(KeyCode::Char('x')), None);
        assert_eq!(key(KeyCode::Enter), None);
    }

    #[test]
    fn test_control_chords_are_not_commands() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_d), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
