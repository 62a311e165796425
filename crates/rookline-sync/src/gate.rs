//! Admission gating for local gestures
//!
//! The gate is derived, never stored: it is recomputed from the session
//! phase, the local side, the side to move, and whether an action is pending.

use crate::{AdmissionError, Phase};
use rookline_core::{Move, Position, Rules, Side};

/// Result of the turn gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allowed,
    Denied(AdmissionError),
}

impl Gate {
    /// Check if gestures are currently allowed
    pub fn is_allowed(self) -> bool {
        matches!(self, Gate::Allowed)
    }
}

/// Inputs of the turn gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnGate {
    pub phase: Phase,
    pub side: Option<Side>,
    pub turn: Option<Side>,
    pub pending: bool,
}

impl TurnGate {
    /// Evaluate the gate without consulting the rules
    pub fn evaluate(&self) -> Gate {
        if self.phase != Phase::Active {
            return Gate::Denied(AdmissionError::NoActiveSession);
        }
        if self.pending {
            return Gate::Denied(AdmissionError::ActionPending);
        }
        let Some(side) = self.side else {
            return Gate::Denied(AdmissionError::NoAssignedSide);
        };
        if self.turn != Some(side) {
            return Gate::Denied(AdmissionError::NotYourTurn);
        }
        Gate::Allowed
    }

    /// Full admission check for `mv` against `position`
    ///
    /// Order: gate, game over, piece ownership, legality.
    pub fn admit<R: Rules>(
        &self,
        rules: &R,
        position: &Position,
        mv: &Move,
    ) -> Result<(), AdmissionError> {
        if let Gate::Denied(reason) = self.evaluate() {
            return Err(reason);
        }
        if rules.status(position).is_terminal() {
            return Err(AdmissionError::GameOver);
        }
        let owner = position
            .side_at(mv.origin)
            .map_err(|_| AdmissionError::IllegalMove)?;
        if let (Some(owner), Some(side)) = (owner, self.side) {
            if owner != side {
                return Err(AdmissionError::WrongSidePiece);
            }
        }
        if !rules.is_legal(position, mv) {
            return Err(AdmissionError::IllegalMove);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookline_core::testing::{positions, ScriptedRules};
    use rookline_core::GameStatus;

    fn white_to_move() -> TurnGate {
        TurnGate {
            phase: Phase::Active,
            side: Some(Side::White),
            turn: Some(Side::White),
            pending: false,
        }
    }

    fn rules() -> ScriptedRules {
        ScriptedRules::new().with_move(&positions::start(), "e2e4", &positions::after_e4())
    }

    fn mv(text: &str) -> Move {
        Move::parse(text).unwrap()
    }

    #[test]
    fn test_gate_allowed() {
        assert_eq!(white_to_move().evaluate(), Gate::Allowed);
        assert!(white_to_move().evaluate().is_allowed());
    }

    #[test]
    fn test_gate_denials() {
        for phase in [Phase::Idle, Phase::Created, Phase::Waiting, Phase::Ended] {
            let gate = TurnGate {
                phase,
                ..white_to_move()
            };
            assert_eq!(gate.evaluate(), Gate::Denied(AdmissionError::NoActiveSession));
        }

        let pending = TurnGate {
            pending: true,
            ..white_to_move()
        };
        assert_eq!(pending.evaluate(), Gate::Denied(AdmissionError::ActionPending));

        let unseated = TurnGate {
            side: None,
            ..white_to_move()
        };
        assert_eq!(unseated.evaluate(), Gate::Denied(AdmissionError::NoAssignedSide));

        let black = TurnGate {
            side: Some(Side::Black),
            ..white_to_move()
        };
        assert_eq!(black.evaluate(), Gate::Denied(AdmissionError::NotYourTurn));

        let unknown_turn = TurnGate {
            turn: None,
            ..white_to_move()
        };
        assert_eq!(unknown_turn.evaluate(), Gate::Denied(AdmissionError::NotYourTurn));
    }

    #[test]
    fn test_admit_legal() {
        let gate = white_to_move();
        assert_eq!(gate.admit(&rules(), &positions::start(), &mv("e2e4")), Ok(()));
    }

    #[test]
    fn test_admit_wrong_side_piece() {
        let gate = white_to_move();
        assert_eq!(
            gate.admit(&rules(), &positions::start(), &mv("e7e5")),
            Err(AdmissionError::WrongSidePiece)
        );
    }

    #[test]
    fn test_admit_illegal_shape() {
        let gate = white_to_move();
        assert_eq!(
            gate.admit(&rules(), &positions::start(), &mv("e2e5")),
            Err(AdmissionError::IllegalMove)
        );
        // Empty origin square
        assert_eq!(
            gate.admit(&rules(), &positions::start(), &mv("e4e5")),
            Err(AdmissionError::IllegalMove)
        );
    }

    #[test]
    fn test_admit_game_over() {
        let rules = rules().with_status(&positions::start(), GameStatus::Checkmate);
        assert_eq!(
            white_to_move().admit(&rules, &positions::start(), &mv("e2e4")),
            Err(AdmissionError::GameOver)
        );
    }

    #[test]
    fn test_gate_checked_before_rules() {
        let gate = TurnGate {
            pending: true,
            ..white_to_move()
        };
        assert_eq!(
            gate.admit(&rules(), &positions::start(), &mv("e7e5")),
            Err(AdmissionError::ActionPending)
        );
    }
}
