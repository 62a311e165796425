//! Error types for rookline-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("Invalid promotion piece: {0:?}")]
    InvalidPromotion(String),

    #[error("Invalid position {fen:?}: {reason}")]
    InvalidPosition { fen: String, reason: String },

    #[error("Illegal move: {0}")]
    IllegalMove(String),
}

impl Error {
    pub(crate) fn invalid_position(fen: &str, reason: impl Into<String>) -> Self {
        Error::InvalidPosition {
            fen: fen.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
