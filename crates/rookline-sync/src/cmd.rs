//! Commands (side effects) produced by the sync core

use crate::Notice;
use rookline_core::{ClientRequest, Position, Side};

/// A side effect for the surrounding application to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// No operation
    None,

    /// Batch multiple commands, executed in order
    Batch(Vec<Cmd>),

    /// Send a request to the authority
    Send(ClientRequest),

    /// Show `position` on the board
    Render { position: Position, orientation: Side },

    /// Replace the move list text
    ShowMoves(String),

    /// Show a status message
    Notify(Notice),
}

impl Cmd {
    /// Create an empty command
    pub fn none() -> Self {
        Cmd::None
    }

    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        // Flatten nested batches and filter out None
        let mut flattened: Vec<Cmd> = cmds
            .into_iter()
            .flat_map(|cmd| match cmd {
                Cmd::None => vec![],
                Cmd::Batch(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => Cmd::None,
            1 => flattened.pop().unwrap_or(Cmd::None),
            _ => Cmd::Batch(flattened),
        }
    }

    /// Create a send command
    pub fn send(request: ClientRequest) -> Self {
        Cmd::Send(request)
    }

    /// Create a notification command
    pub fn notify(notice: Notice) -> Self {
        Cmd::Notify(notice)
    }

    /// Check if this is a None command
    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Flatten into the ordered list of leaf commands
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => vec![],
            Cmd::Batch(inner) => inner.into_iter().flat_map(Cmd::into_vec).collect(),
            other => vec![other],
        }
    }

    fn leaves(&self) -> Vec<&Cmd> {
        match self {
            Cmd::None => vec![],
            Cmd::Batch(inner) => inner.iter().flat_map(Cmd::leaves).collect(),
            other => vec![other],
        }
    }

    /// Requests carried by this command
    pub fn requests(&self) -> Vec<&ClientRequest> {
        self.leaves()
            .into_iter()
            .filter_map(|cmd| match cmd {
                Cmd::Send(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Notices carried by this command
    pub fn notices(&self) -> Vec<&Notice> {
        self.leaves()
            .into_iter()
            .filter_map(|cmd| match cmd {
                Cmd::Notify(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    /// The last position this command renders, if any
    pub fn rendered(&self) -> Option<&Position> {
        self.leaves()
            .into_iter()
            .filter_map(|cmd| match cmd {
                Cmd::Render { position, .. } => Some(position),
                _ => None,
            })
            .last()
    }
}
