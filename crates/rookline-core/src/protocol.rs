//! Message contract between the client and the remote authority
//!
//! Outbound traffic is a [`ClientRequest`], inbound traffic a [`ServerEvent`].
//! Replies to create/join requests arrive as ordinary events; the client
//! matches them against the request it has in flight.

use crate::{Move, Player, PlayerId, Position, Promotion, RoomId, Side, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Requests the client sends to the authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientRequest {
    /// Open a new room; answered by `SessionCreated` or `CreateFailed`
    CreateSession { display_name: String },
    /// Enter an existing room; answered by `JoinAccepted` or `JoinRejected`
    JoinSession {
        room_id: RoomId,
        display_name: String,
    },
    /// Fire-and-forget departure notice
    LeaveSession { room_id: RoomId },
    /// A move for the authority to judge
    SubmitAction(ActionRequest),
}

/// A move submission
///
/// `client_timestamp_ms` and `elapsed_think_ms` are telemetry only. The
/// authority is the sole judge of anything timing-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub room_id: RoomId,
    pub origin: Square,
    pub destination: Square,
    pub promotion: Option<Promotion>,
    pub client_timestamp_ms: i64,
    pub elapsed_think_ms: u64,
}

impl ActionRequest {
    /// The move this request carries
    pub fn as_move(&self) -> Move {
        Move {
            origin: self.origin,
            destination: self.destination,
            promotion: self.promotion,
        }
    }
}

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One side won on the board
    WinBySide,
    /// Drawn by rule or agreement
    Draw,
    /// The game stopped because a player left
    Interrupted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::WinBySide => write!(f, "win"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Authoritative confirmation of a move, broadcast to both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAccepted {
    /// Room the move belongs to, when the authority names it
    pub room_id: Option<RoomId>,
    /// Canonical position after the move
    pub resulting_position: Position,
    /// The move in standard notation, e.g. `Nf3`
    pub move_notation: String,
    pub sequence_number: u64,
    /// Who moved, when the authority names them
    pub player_id: Option<PlayerId>,
    pub server_timestamp_ms: Option<i64>,
}

impl ActionAccepted {
    /// Create a confirmation with the required fields
    pub fn new(
        resulting_position: Position,
        move_notation: impl Into<String>,
        sequence_number: u64,
    ) -> Self {
        Self {
            room_id: None,
            resulting_position,
            move_notation: move_notation.into(),
            sequence_number,
            player_id: None,
            server_timestamp_ms: None,
        }
    }

    /// Set the room
    pub fn in_room(mut self, room_id: impl Into<RoomId>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Set the mover
    pub fn by(mut self, player_id: impl Into<PlayerId>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }
}

/// Events the authority pushes to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerEvent {
    /// Reply to `CreateSession`
    SessionCreated { room_id: RoomId },
    /// Reply to `CreateSession`
    CreateFailed { reason: Option<String> },
    /// Reply to `JoinSession`
    JoinAccepted { room_id: RoomId },
    /// Reply to `JoinSession`
    JoinRejected { reason: Option<String> },
    /// Both seats are filled and play begins
    SessionStarted {
        room_id: RoomId,
        players: Vec<Player>,
        /// Absent means the standard start position
        initial_position: Option<Position>,
    },
    ActionAccepted(ActionAccepted),
    ActionRejected {
        room_id: Option<RoomId>,
        reason: Option<String>,
    },
    /// The side to move is in check; display only
    CheckNotice,
    SessionEnded {
        room_id: Option<RoomId>,
        outcome: Outcome,
        winning_side: Option<Side>,
    },
    MembershipChanged { players: Vec<Player> },
}

impl ServerEvent {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::SessionCreated { .. } => "session_created",
            ServerEvent::CreateFailed { .. } => "create_failed",
            ServerEvent::JoinAccepted { .. } => "join_accepted",
            ServerEvent::JoinRejected { .. } => "join_rejected",
            ServerEvent::SessionStarted { .. } => "session_started",
            ServerEvent::ActionAccepted(_) => "action_accepted",
            ServerEvent::ActionRejected { .. } => "action_rejected",
            ServerEvent::CheckNotice => "check_notice",
            ServerEvent::SessionEnded { .. } => "session_ended",
            ServerEvent::MembershipChanged { .. } => "membership_changed",
        }
    }

    /// Room named by the event, if any
    pub fn room_id(&self) -> Option<&RoomId> {
        match self {
            ServerEvent::SessionCreated { room_id }
            | ServerEvent::JoinAccepted { room_id }
            | ServerEvent::SessionStarted { room_id, .. } => Some(room_id),
            ServerEvent::ActionAccepted(accepted) => accepted.room_id.as_ref(),
            ServerEvent::ActionRejected { room_id, .. }
            | ServerEvent::SessionEnded { room_id, .. } => room_id.as_ref(),
            ServerEvent::CreateFailed { .. }
            | ServerEvent::JoinRejected { .. }
            | ServerEvent::CheckNotice
            | ServerEvent::MembershipChanged { .. } => None,
        }
    }

    /// Rejection with a reason and no room
    pub fn rejected(reason: impl Into<String>) -> Self {
        ServerEvent::ActionRejected {
            room_id: None,
            reason: Some(reason.into()),
        }
    }

    /// End of session with no room
    pub fn ended(outcome: Outcome, winning_side: Option<Side>) -> Self {
        ServerEvent::SessionEnded {
            room_id: None,
            outcome,
            winning_side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_lookup() {
        let started = ServerEvent::SessionStarted {
            room_id: RoomId::new("R1"),
            players: vec![],
            initial_position: None,
        };
        assert_eq!(started.room_id(), Some(&RoomId::new("R1")));
        assert_eq!(started.kind(), "session_started");

        let accepted = ServerEvent::ActionAccepted(ActionAccepted::new(Position::start(), "e4", 1));
        assert_eq!(accepted.room_id(), None);

        let accepted =
            ServerEvent::ActionAccepted(ActionAccepted::new(Position::start(), "e4", 1).in_room("R2"));
        assert_eq!(accepted.room_id(), Some(&RoomId::new("R2")));
    }

    #[test]
    fn test_action_request_move() {
        let request = ActionRequest {
            room_id: RoomId::new("R1"),
            origin: "e7".parse().unwrap(),
            destination: "e8".parse().unwrap(),
            promotion: Some(Promotion::Rook),
            client_timestamp_ms: 10,
            elapsed_think_ms: 5,
        };
        assert_eq!(request.as_move().to_string(), "e7e8r");
    }
}
