//! Session driver
//!
//! Glues a [`Connection`], a [`SyncCore`] and a [`Presenter`] together:
//! inbound frames are decoded and fed to the core one at a time, and every
//! [`Cmd`] the core returns is carried out before the next input.

use crate::{codec, Connection, Error, Presenter, Result};
use rookline_core::{Clock, Move, Rules};
use rookline_sync::{AdmissionError, Cmd, Notice, SyncConfig, SyncCore};
use tracing::{debug, warn};

/// What happened to a dropped piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The move was predicted and sent
    Accepted,
    /// The piece returns to its origin square
    Snapback(AdmissionError),
}

/// Runs one client session over a connection
pub struct SessionDriver<C, R, K, P>
where
    C: Connection,
    R: Rules,
    K: Clock,
    P: Presenter,
{
    connection: C,
    core: SyncCore<R, K>,
    presenter: P,
    disconnect_reported: bool,
}

impl<C, R, K, P> SessionDriver<C, R, K, P>
where
    C: Connection,
    R: Rules,
    K: Clock,
    P: Presenter,
{
    /// Create a driver for an already-identified connection
    pub fn new(connection: C, rules: R, clock: K, config: SyncConfig, presenter: P) -> Result<Self> {
        let local_player = connection.local_player_id().ok_or_else(|| {
            Error::Transport("connection has not been assigned a player id".to_string())
        })?;
        debug!(player = %local_player, "session driver ready");
        Ok(Self {
            connection,
            core: SyncCore::new(local_player, rules, clock, config),
            presenter,
            disconnect_reported: false,
        })
    }

    /// Request a new room
    pub fn create_room(&mut self, display_name: &str) -> Result<()> {
        let cmd = self.core.create_session(display_name)?;
        self.send_session_request(cmd)
    }

    /// Request to join an existing room
    pub fn join_room(&mut self, room_id: &str, display_name: &str) -> Result<()> {
        let cmd = self.core.join_session(room_id, display_name)?;
        self.send_session_request(cmd)
    }

    fn send_session_request(&mut self, cmd: Cmd) -> Result<()> {
        self.execute(cmd).inspect_err(|_| self.core.abandon_request())
    }

    /// Leave the current room
    ///
    /// The local session is gone even if the leave notice cannot be sent.
    pub fn leave_room(&mut self) {
        let cmd = self.core.leave_session();
        if let Err(e) = self.execute(cmd) {
            warn!(error = %e, "could not tell the authority we left");
        }
    }

    /// Handle a piece dropped on the board
    pub fn on_drop(&mut self, mv: Move) -> Result<DropOutcome> {
        match self.core.submit_move(mv) {
            Ok(cmd) => match self.execute(cmd) {
                Ok(()) => Ok(DropOutcome::Accepted),
                Err(e) => {
                    // The authority never saw the move
                    let rollback = self.core.abandon_pending();
                    self.execute(rollback)?;
                    Err(e)
                }
            },
            Err(reason) => {
                self.presenter.notify(&Notice::Denied(reason));
                Ok(DropOutcome::Snapback(reason))
            }
        }
    }

    /// Drain and apply every frame the connection has buffered
    ///
    /// Returns the number of events applied. Undecodable frames are logged
    /// and skipped.
    pub fn pump(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Some(frame) = self
            .connection
            .recv()
            .map_err(|e| Error::Transport(e.to_string()))?
        {
            let event = match codec::decode_event(&frame) {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, len = frame.len(), "dropping undecodable frame");
                    continue;
                }
            };
            let cmd = self.core.handle_event(event);
            self.execute(cmd)?;
            applied += 1;
        }

        if !self.connection.is_connected() && !self.disconnect_reported {
            warn!("connection lost");
            self.disconnect_reported = true;
            self.presenter.notify(&Notice::Disconnected);
        }
        Ok(applied)
    }

    /// Periodic housekeeping: raises the waiting indicator when due
    pub fn tick(&mut self) -> Result<()> {
        let cmd = self.core.poll();
        self.execute(cmd)
    }

    /// Leave the room and close the connection
    pub fn close(&mut self) -> Result<()> {
        self.leave_room();
        self.connection
            .close()
            .map_err(|e| Error::Transport(e.to_string()))
    }

    /// Carry out a command from the core
    pub fn execute(&mut self, cmd: Cmd) -> Result<()> {
        for cmd in cmd.into_vec() {
            match cmd {
                Cmd::Send(request) => {
                    let frame = codec::encode_request(&request)?;
                    self.connection
                        .send_reliable(&frame)
                        .map_err(|e| Error::Transport(e.to_string()))?;
                }
                Cmd::Render {
                    position,
                    orientation,
                } => self.presenter.render(&position, orientation),
                Cmd::ShowMoves(text) => self.presenter.show_moves(&text),
                Cmd::Notify(notice) => self.presenter.notify(&notice),
                Cmd::None | Cmd::Batch(_) => {}
            }
        }
        Ok(())
    }

    pub fn core(&self) -> &SyncCore<R, K> {
        &self.core
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }
}
