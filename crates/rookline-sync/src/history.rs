//! Record of confirmed moves

use rookline_core::{PlayerId, Side};
use serde::{Deserialize, Serialize};

/// One move as confirmed by the authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub sequence_number: u64,
    pub notation: String,
    pub player_id: Option<PlayerId>,
}

/// Confirmed moves, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    moves: Vec<RecordedMove>,
}

impl MoveHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a confirmed move
    pub fn record(&mut self, recorded: RecordedMove) {
        self.moves.push(recorded);
    }

    /// The most recent move
    pub fn last(&self) -> Option<&RecordedMove> {
        self.moves.last()
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Check if no move has been played
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Numbered move text, e.g. `1. e4 e5 2. Nf3`
    ///
    /// `first_to_move` is the side to move in the initial position; when
    /// black starts the text opens with `1...`.
    pub fn to_movetext(&self, first_to_move: Side) -> String {
        let mut text = String::new();
        let mut number = 1u32;
        let mut side = first_to_move;

        for (i, recorded) in self.moves.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            match side {
                Side::White => text.push_str(&format!("{}. {}", number, recorded.notation)),
                Side::Black => {
                    if i == 0 {
                        text.push_str(&format!("{}... {}", number, recorded.notation));
                    } else {
                        text.push_str(&recorded.notation);
                    }
                    number += 1;
                }
            }
            side = side.opposite();
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(notations: &[&str]) -> MoveHistory {
        let mut history = MoveHistory::new();
        for (i, notation) in notations.iter().enumerate() {
            history.record(RecordedMove {
                sequence_number: i as u64 + 1,
                notation: notation.to_string(),
                player_id: None,
            });
        }
        history
    }

    #[test]
    fn test_movetext_from_white() {
        let history = history(&["e4", "e5", "Nf3"]);
        assert_eq!(history.to_movetext(Side::White), "1. e4 e5 2. Nf3");
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().map(|m| m.sequence_number), Some(3));
    }

    #[test]
    fn test_movetext_from_black() {
        let history = history(&["e5", "Nf3", "Nc6"]);
        assert_eq!(history.to_movetext(Side::Black), "1... e5 2. Nf3 Nc6");
    }

    #[test]
    fn test_movetext_empty() {
        assert_eq!(MoveHistory::new().to_movetext(Side::White), "");
    }
}
