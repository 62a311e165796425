//! User-facing status messages

use crate::AdmissionError;
use rookline_core::{Outcome, RoomId, Side};
use std::fmt;

/// Something the player should be told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RoomCreated { room_id: RoomId },
    CreateFailed { reason: Option<String> },
    Joined { room_id: RoomId },
    JoinFailed { reason: Option<String> },
    Left { room_id: RoomId },
    GameStarted { side: Option<Side> },
    RosterChanged { names: Vec<String> },
    /// A gesture was refused locally
    Denied(AdmissionError),
    /// The authority refused the pending move
    MoveRejected { reason: String },
    /// The pending move has not been confirmed for a while
    AwaitingConfirmation,
    Check,
    GameOver {
        outcome: Outcome,
        winning_side: Option<Side>,
    },
    /// The opponent left mid-game
    SessionInterrupted,
    /// The transport lost its connection
    Disconnected,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RoomCreated { room_id } => {
                write!(f, "Room created: {} (waiting for opponent)", room_id)
            }
            Notice::CreateFailed { reason: None } => write!(f, "Create failed"),
            Notice::CreateFailed {
                reason: Some(reason),
            } => write!(f, "Create failed: {}", reason),
            Notice::Joined { room_id } => {
                write!(f, "Joined room {}. Waiting for the game to start.", room_id)
            }
            Notice::JoinFailed { reason } => {
                write!(f, "Join failed: {}", reason.as_deref().unwrap_or(""))
            }
            Notice::Left { .. } => write!(f, "Left room"),
            Notice::GameStarted { side: Some(side) } => {
                write!(f, "Game started! You play {}", side)
            }
            Notice::GameStarted { side: None } => write!(f, "Game started!"),
            Notice::RosterChanged { names } => write!(f, "Room players: {}", names.join(", ")),
            Notice::Denied(reason) => write!(f, "{}", reason),
            Notice::MoveRejected { reason } => write!(f, "Invalid move: {}", reason),
            Notice::AwaitingConfirmation => write!(f, "Waiting for confirmation..."),
            Notice::Check => write!(f, "Check!"),
            Notice::GameOver {
                winning_side: Some(side),
                ..
            } => write!(f, "Game Over: winner {}", side),
            Notice::GameOver { .. } => write!(f, "Game Over: draw"),
            Notice::SessionInterrupted => write!(f, "Game interrupted: opponent left"),
            Notice::Disconnected => write!(f, "Disconnected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Notice::RoomCreated {
                room_id: RoomId::new("R1")
            }
            .to_string(),
            "Room created: R1 (waiting for opponent)"
        );
        assert_eq!(
            Notice::MoveRejected {
                reason: "stale-turn".into()
            }
            .to_string(),
            "Invalid move: stale-turn"
        );
        assert_eq!(
            Notice::GameOver {
                outcome: Outcome::WinBySide,
                winning_side: Some(Side::White)
            }
            .to_string(),
            "Game Over: winner white"
        );
        assert_eq!(
            Notice::GameOver {
                outcome: Outcome::Draw,
                winning_side: None
            }
            .to_string(),
            "Game Over: draw"
        );
        assert_eq!(
            Notice::RosterChanged {
                names: vec!["Alice".into(), "Bob".into()]
            }
            .to_string(),
            "Room players: Alice, Bob"
        );
        assert_eq!(Notice::Denied(AdmissionError::NotYourTurn).to_string(), "not your turn");
    }
}
