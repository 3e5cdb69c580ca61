//! Error types.
//!
//! `GameError` aborts the current handler; `ActionError` is a rejected player
//! action that leaves state untouched and is shown as a warning.

use crate::dungeon::Direction;
use crate::save_manager::SaveError;
use thiserror::Error;

/// Failures that abort the current state handler.
#[derive(Debug, Error)]
pub enum GameError {
    /// Console I/O failed or the input stream ended
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Saving or loading failed
    #[error("save file error: {0}")]
    Save(#[from] SaveError),

    /// A handler that needs a live session ran without one
    #[error("no active game session")]
    NoActiveSession,
}

impl GameError {
    /// True when the input stream is exhausted and the run loop should stop.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, GameError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

pub type GameResult<T> = Result<T, GameError>;

/// Domain-rule violations. Returned instead of mutating state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("your inventory is full")]
    InventoryFull,

    #[error("not enough gold ({available} of {cost})")]
    InsufficientGold { cost: u32, available: u32 },

    #[error("no item with id {0}")]
    ItemNotFound(u16),

    #[error("you have not learned any abilities")]
    NoAbilities,

    #[error("no ability in slot {0}")]
    InvalidAbility(usize),

    #[error("{name} is recharging ({remaining} turns left)")]
    AbilityOnCooldown { name: String, remaining: u32 },

    #[error("there is no exit to the {}", .0.name())]
    NoExit(Direction),

    #[error("your quest log is full")]
    QuestLogFull,

    #[error("there is no shop here")]
    NoShop,

    #[error("too many active status effects")]
    StatusEffectLimit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_end_of_input_detection() {
        let eof = GameError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "done"));
        assert!(eof.is_end_of_input());

        let other = GameError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!other.is_end_of_input());
        assert!(!GameError::NoActiveSession.is_end_of_input());
    }

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::InsufficientGold {
            cost: 40,
            available: 12,
        };
        assert_eq!(err.to_string(), "not enough gold (12 of 40)");
        assert_eq!(
            ActionError::NoExit(Direction::North).to_string(),
            "there is no exit to the North"
        );
    }
}
