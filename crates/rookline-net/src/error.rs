//! Error types for rookline-net

use thiserror::Error;

/// Net error type
#[derive(Debug, Error)]
pub enum Error {
    /// Transport error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The sync core refused a request
    #[error(transparent)]
    Sync(#[from] rookline_sync::Error),
}

impl From<rookline_sync::SessionError> for Error {
    fn from(err: rookline_sync::SessionError) -> Self {
        Error::Sync(err.into())
    }
}

/// Result type for net operations
pub type Result<T> = std::result::Result<T, Error>;
