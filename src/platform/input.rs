//! Keyboard mapping
//!
//! Key names follow `KeyboardEvent.key`.

use crate::sim::{Direction, GameSession};

/// A command produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Steer(Direction),
    TogglePause,
    Reset,
    ToggleAutopilot,
}

pub fn map_key(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(KeyCommand::Steer(Direction::Left)),
        "ArrowRight" | "d" | "D" => Some(KeyCommand::Steer(Direction::Right)),
        " " | "Spacebar" => Some(KeyCommand::TogglePause),
        "r" | "R" | "Enter" => Some(KeyCommand::Reset),
        "i" | "I" => Some(KeyCommand::ToggleAutopilot),
        _ => None,
    }
}

impl KeyCommand {
    /// Apply to a session at `now_ms`
    pub fn apply(self, session: &mut GameSession, now_ms: u64) {
        match self {
            KeyCommand::Steer(direction) => session.press(direction),
            KeyCommand::TogglePause => {
                session.toggle_pause(now_ms);
            }
            KeyCommand::Reset => session.reset(now_ms),
            KeyCommand::ToggleAutopilot => {
                let enabled = !session.autopilot();
                session.set_autopilot(enabled);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GamePhase;

    #[test]
    fn test_key_names() {
        assert_eq!(map_key("ArrowLeft"), Some(KeyCommand::Steer(Direction::Left)));
        assert_eq!(map_key("ArrowRight"), Some(KeyCommand::Steer(Direction::Right)));
        assert_eq!(map_key(" "), Some(KeyCommand::TogglePause));
        assert_eq!(map_key("Enter"), Some(KeyCommand::Reset));
        assert_eq!(map_key("Shift"), None);
    }

    #[test]
    fn test_commands_drive_session() {
        let mut session = GameSession::new(GameConfig::default(), 3, 0);
        KeyCommand::Steer(Direction::Left).apply(&mut session, 10);
        assert!(session.input().move_left && !session.input().move_right);

        KeyCommand::TogglePause.apply(&mut session, 20);
        assert_eq!(session.phase(), GamePhase::Paused);

        KeyCommand::ToggleAutopilot.apply(&mut session, 30);
        assert!(session.autopilot());

        KeyCommand::Reset.apply(&mut session, 40);
        assert!(session.is_getting_ready());
    }
}
