//! Rules capability
//!
//! Legal-move generation and terminal detection live outside this workspace.
//! Implement [`Rules`] over whichever engine the application ships with.

use crate::{Move, Position, Result};
use serde::{Deserialize, Serialize};

/// Status of a position as judged by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    /// True when no further moves can be played
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

/// A rules engine the client consults before predicting a move
pub trait Rules {
    /// Whether `mv` is legal in `position`
    fn is_legal(&self, position: &Position, mv: &Move) -> bool;

    /// Position after playing `mv`
    fn apply_move(&self, position: &Position, mv: &Move) -> Result<Position>;

    /// Terminal/check status of `position`
    fn status(&self, position: &Position) -> GameStatus;
}

impl<R: Rules + ?Sized> Rules for &R {
    fn is_legal(&self, position: &Position, mv: &Move) -> bool {
        (**self).is_legal(position, mv)
    }

    fn apply_move(&self, position: &Position, mv: &Move) -> Result<Position> {
        (**self).apply_move(position, mv)
    }

    fn status(&self, position: &Position) -> GameStatus {
        (**self).status(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal() {
        assert!(!GameStatus::Ongoing.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert!(GameStatus::Checkmate.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
    }
}
