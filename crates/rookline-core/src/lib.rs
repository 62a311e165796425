//! Rookline Core - Shared vocabulary for the two-player game client
//!
//! This crate provides the types every other rookline crate speaks in:
//! - Board vocabulary (`Side`, `Square`, `Promotion`, `Move`, `Position`)
//! - Identity and membership (`PlayerId`, `RoomId`, `Player`, `Roster`)
//! - The wire protocol (`ClientRequest`, `ServerEvent`)
//! - Capabilities consumed from the outside world (`Rules`, `Clock`)
//!
//! ## Capabilities
//!
//! Move legality is never decided here. A [`Rules`] implementation is
//! plugged in by the application; the client's copy of the rules is advisory
//! and only hides latency, the remote authority always has the last word.
//!
//! ## Testing Feature
//!
//! Enable the `testing` feature for in-memory doubles:
//! ```toml
//! rookline-core = { version = "0.1", features = ["testing"] }
//! ```

mod clock;
mod error;
mod identity;
mod moves;
mod player;
mod position;
pub mod protocol;
mod rules;
mod side;
mod square;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use identity::{PlayerId, RoomId};
pub use moves::{Move, Promotion};
pub use player::{Player, Roster};
pub use position::Position;
pub use protocol::{ActionAccepted, ActionRequest, ClientRequest, Outcome, ServerEvent};
pub use rules::{GameStatus, Rules};
pub use side::Side;
pub use square::Square;
