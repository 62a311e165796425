//! Transport traits for network communication
//!
//! The driver only needs a reliable, ordered byte pipe to the authority.
//! Users implement [`Connection`] for their chosen stack (WebSocket, TCP, ...).

use rookline_core::PlayerId;

/// Connection-oriented transport to the authority
pub trait Connection: Send + Sync {
    /// Error type for this connection
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send one frame reliably (guaranteed delivery, ordered)
    fn send_reliable(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receive one frame (non-blocking)
    ///
    /// Returns `Ok(None)` if no frame is available.
    fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Check if the connection is still alive
    fn is_connected(&self) -> bool;

    /// Close the connection gracefully
    fn close(&self) -> Result<(), Self::Error>;

    /// Identity the authority assigned to this connection
    ///
    /// The same id appears in the player list of `sessionStarted`, which is
    /// how the client learns which side it plays.
    fn local_player_id(&self) -> Option<PlayerId>;
}
