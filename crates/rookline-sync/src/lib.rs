//! Rookline Sync - Optimistic move synchronization
//!
//! Keeps a local, possibly stale mirror of a two-player game consistent with
//! a remote authority while showing the local player's own moves instantly.
//!
//! - **Admission**: the [`TurnGate`] and the rules capability decide whether a
//!   gesture may even be attempted
//! - **Prediction**: an admitted move is applied locally and sent out
//! - **Reconciliation**: the authority's verdict always replaces the prediction
//! - **Session lifecycle**: create/join, start, end, leave
//!
//! # Architecture
//!
//! ```text
//!   gesture ──▶ SyncCore::submit_move ──▶ Cmd::Send(SubmitAction)
//!                     │                   Cmd::Render(predicted)
//!                     ▼
//!            ClientSessionContext
//!            ├─ LocalGameView  (confirmed + at most one tentative)
//!            ├─ PendingSlot    (at most one PendingAction)
//!            └─ Roster
//!                     ▲
//!   ServerEvent ─▶ SyncCore::handle_event ──▶ Cmd::Render(confirmed) / Cmd::Notify
//! ```
//!
//! The core performs no I/O. Every call returns a [`Cmd`] describing what the
//! surrounding application should send, render, or display.
//!
//! # Example
//!
//! ```rust,ignore
//! use rookline_core::{Move, PlayerId, SystemClock};
//! use rookline_sync::{SyncConfig, SyncCore};
//!
//! let mut core = SyncCore::new(PlayerId::new(socket_id), rules, SystemClock, SyncConfig::default());
//! run(core.create_session("Alice")?);
//!
//! loop {
//!     if let Some(event) = next_event() {
//!         run(core.handle_event(event));
//!     }
//!     if let Some(mv) = next_gesture() {
//!         match core.submit_move(mv) {
//!             Ok(cmd) => run(cmd),
//!             Err(denied) => snap_back(denied),
//!         }
//!     }
//!     run(core.poll());
//! }
//! ```

mod cmd;
mod config;
mod context;
mod engine;
mod error;
mod gate;
mod history;
mod notice;
mod pending;
mod view;

#[cfg(test)]
mod property_tests;

pub use cmd::Cmd;
pub use config::SyncConfig;
pub use context::{ClientSessionContext, Phase, SyncState};
pub use engine::SyncCore;
pub use error::{AdmissionError, Error, Result, SessionError};
pub use gate::{Gate, TurnGate};
pub use history::{MoveHistory, RecordedMove};
pub use notice::Notice;
pub use pending::{PendingAction, PendingSlot};
pub use view::LocalGameView;
