//! Rookline Net - Transport wiring for the sync core
//!
//! The sync core never performs I/O. This crate connects it to the outside:
//!
//! - **Connection**: a reliable byte pipe to the authority, implemented by the user
//! - **Codec**: one bincode-encoded protocol message per frame
//! - **Presenter**: where boards, move text and status messages are shown
//! - **SessionDriver**: pumps inbound frames into the core and executes its commands
//!
//! # Example
//!
//! ```rust,ignore
//! use rookline_core::SystemClock;
//! use rookline_net::SessionDriver;
//! use rookline_sync::SyncConfig;
//!
//! let mut driver = SessionDriver::new(socket, rules, SystemClock, SyncConfig::default(), ui)?;
//! driver.join_room("R1", "Bob")?;
//!
//! loop {
//!     driver.pump()?;
//!     if let Some(mv) = ui.take_drop() {
//!         if let DropOutcome::Snapback(_) = driver.on_drop(mv)? {
//!             ui.snap_back();
//!         }
//!     }
//!     driver.tick()?;
//! }
//! ```

pub mod codec;
mod driver;
mod error;
mod presenter;
mod transport;

pub use driver::{DropOutcome, SessionDriver};
pub use error::{Error, Result};
pub use presenter::Presenter;
pub use transport::Connection;
