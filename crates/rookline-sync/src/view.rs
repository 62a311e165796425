//! The client's mirror of the board
//!
//! At any instant the view is either exactly the last authority-confirmed
//! state, or that state plus one locally predicted position on top.

use crate::{MoveHistory, RecordedMove};
use rookline_core::{ActionAccepted, Position, Side};

/// Confirmed position, optional tentative prediction, and confirmed history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalGameView {
    /// Last position the authority confirmed (or the initial position)
    confirmed: Position,
    /// Locally predicted position awaiting the authority's verdict
    tentative: Option<Position>,
    history: MoveHistory,
    /// Sequence number of the last confirmed move
    confirmed_sequence: Option<u64>,
    /// Side to move in the initial position, for move numbering
    first_to_move: Side,
}

impl LocalGameView {
    /// Create a view at `initial`
    pub fn new(initial: Position) -> Self {
        let first_to_move = initial.side_to_move().unwrap_or(Side::White);
        Self {
            confirmed: initial,
            tentative: None,
            history: MoveHistory::new(),
            confirmed_sequence: None,
            first_to_move,
        }
    }

    /// The position to display: the prediction if there is one
    pub fn current(&self) -> &Position {
        self.tentative.as_ref().unwrap_or(&self.confirmed)
    }

    /// The last confirmed position
    pub fn confirmed(&self) -> &Position {
        &self.confirmed
    }

    /// The outstanding prediction
    pub fn tentative(&self) -> Option<&Position> {
        self.tentative.as_ref()
    }

    /// Check if a prediction is layered on top of the confirmed state
    pub fn is_tentative(&self) -> bool {
        self.tentative.is_some()
    }

    /// Side to move in the displayed position
    ///
    /// `None` when the position's active-colour field is unreadable.
    pub fn turn(&self) -> Option<Side> {
        self.current().side_to_move().ok()
    }

    /// Confirmed moves
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Sequence number of the last confirmed move
    pub fn confirmed_sequence(&self) -> Option<u64> {
        self.confirmed_sequence
    }

    /// Confirmed moves as numbered move text
    pub fn movetext(&self) -> String {
        self.history.to_movetext(self.first_to_move)
    }

    /// Whether a confirmation with `sequence_number` was already applied
    pub fn is_stale(&self, sequence_number: u64) -> bool {
        self.confirmed_sequence
            .is_some_and(|last| sequence_number <= last)
    }

    /// Layer a prediction over the confirmed state
    pub(crate) fn predict(&mut self, position: Position) {
        self.tentative = Some(position);
    }

    /// Drop the prediction and fall back to the confirmed state
    ///
    /// Returns true if there was a prediction to drop.
    pub(crate) fn discard_tentative(&mut self) -> bool {
        self.tentative.take().is_some()
    }

    /// Adopt an authoritative confirmation
    ///
    /// The authority's position replaces both the confirmed state and any
    /// prediction, even when the prediction looks identical.
    pub(crate) fn apply_confirmation(&mut self, accepted: &ActionAccepted) {
        self.confirmed = accepted.resulting_position.clone();
        self.tentative = None;
        self.confirmed_sequence = Some(accepted.sequence_number);
        self.history.record(RecordedMove {
            sequence_number: accepted.sequence_number,
            notation: accepted.move_notation.clone(),
            player_id: accepted.player_id.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookline_core::testing::positions;

    #[test]
    fn test_predict_and_discard() {
        let mut view = LocalGameView::new(positions::start());
        assert_eq!(view.turn(), Some(Side::White));

        view.predict(positions::after_e4());
        assert!(view.is_tentative());
        assert_eq!(view.current(), &positions::after_e4());
        assert_eq!(view.confirmed(), &positions::start());
        assert_eq!(view.turn(), Some(Side::Black));

        assert!(view.discard_tentative());
        assert!(!view.discard_tentative());
        assert_eq!(view.current(), &positions::start());
    }

    #[test]
    fn test_confirmation_replaces_prediction() {
        let mut view = LocalGameView::new(positions::start());
        view.predict(positions::after_d4());

        let accepted = ActionAccepted::new(positions::after_e4(), "e4", 1);
        view.apply_confirmation(&accepted);

        assert!(!view.is_tentative());
        assert_eq!(view.current(), &positions::after_e4());
        assert_eq!(view.confirmed_sequence(), Some(1));
        assert_eq!(view.movetext(), "1. e4");
    }

    #[test]
    fn test_stale_sequence() {
        let mut view = LocalGameView::new(positions::start());
        assert!(!view.is_stale(0));
        assert!(!view.is_stale(1));

        view.apply_confirmation(&ActionAccepted::new(positions::after_e4(), "e4", 1));
        assert!(view.is_stale(1));
        assert!(!view.is_stale(2));
    }

    #[test]
    fn test_unreadable_position_has_no_turn() {
        let view = LocalGameView::new(Position::from_fen_unchecked("garbage"));
        assert_eq!(view.turn(), None);
    }
}
