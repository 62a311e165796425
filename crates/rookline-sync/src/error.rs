//! Error types for rookline-sync

use rookline_core::RoomId;
use thiserror::Error;

/// Why a local gesture was refused before reaching the network
///
/// Admission errors never change state; they only explain a snap-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AdmissionError {
    #[error("no game in progress")]
    NoActiveSession,

    #[error("waiting for the previous move to be confirmed")]
    ActionPending,

    #[error("no side has been assigned to you")]
    NoAssignedSide,

    #[error("not your turn")]
    NotYourTurn,

    #[error("that piece belongs to your opponent")]
    WrongSidePiece,

    #[error("illegal move")]
    IllegalMove,

    #[error("the game is over")]
    GameOver,
}

/// Why a create/join request could not be issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("already in room {0}; leave it first")]
    AlreadyInSession(RoomId),

    #[error("a create or join request is already in flight")]
    RequestInFlight,

    #[error("enter a room id or create a room")]
    MissingRoomId,
}

/// Sync error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("move refused: {0}")]
    Admission(#[from] AdmissionError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("core error: {0}")]
    Core(#[from] rookline_core::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, Error>;
