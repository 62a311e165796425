//! Per-session state
//!
//! A [`ClientSessionContext`] is created when the authority acknowledges a
//! create or join request and destroyed when the player leaves. Everything
//! the core knows about a game lives here; there is no ambient state.

use crate::{LocalGameView, PendingSlot, TurnGate};
use rookline_core::{Outcome, Player, PlayerId, Position, RoomId, Roster, Side};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No session
    Idle,
    /// This client created the room and waits for an opponent
    Created,
    /// Both players are present or this client joined; waiting for start
    Waiting,
    Active,
    Ended,
}

/// Externally visible state of the synchronization state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncState {
    Idle,
    AwaitingPeer,
    Active { predicting: bool },
    Ended,
}

/// Everything known about the current room
#[derive(Debug, Clone)]
pub struct ClientSessionContext {
    room_id: RoomId,
    phase: Phase,
    display_name: String,
    side: Option<Side>,
    /// Opponent seated at session start
    peer: Option<PlayerId>,
    roster: Roster,
    view: Option<LocalGameView>,
    pending: PendingSlot,
    outcome: Option<(Outcome, Option<Side>)>,
    /// Client time of the last confirmed move (or session start)
    last_confirmed_at_ms: i64,
}

impl ClientSessionContext {
    pub(crate) fn new(room_id: RoomId, display_name: String, phase: Phase, now_ms: i64) -> Self {
        Self {
            room_id,
            phase,
            display_name,
            side: None,
            peer: None,
            roster: Roster::new(),
            view: None,
            pending: PendingSlot::new(),
            outcome: None,
            last_confirmed_at_ms: now_ms,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Name this client presented to the room
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn view(&self) -> Option<&LocalGameView> {
        self.view.as_ref()
    }

    pub fn pending(&self) -> &PendingSlot {
        &self.pending
    }

    /// How the session finished, with the winning side if any
    pub fn outcome(&self) -> Option<(Outcome, Option<Side>)> {
        self.outcome
    }

    pub fn last_confirmed_at_ms(&self) -> i64 {
        self.last_confirmed_at_ms
    }

    /// Derived state-machine state
    pub fn state(&self) -> SyncState {
        match self.phase {
            Phase::Idle => SyncState::Idle,
            Phase::Created | Phase::Waiting => SyncState::AwaitingPeer,
            Phase::Active => SyncState::Active {
                predicting: self.pending.is_occupied(),
            },
            Phase::Ended => SyncState::Ended,
        }
    }

    /// Current inputs of the turn gate
    pub fn gate(&self) -> TurnGate {
        TurnGate {
            phase: self.phase,
            side: self.side,
            turn: self.view.as_ref().and_then(LocalGameView::turn),
            pending: self.pending.is_occupied(),
        }
    }

    /// Whether the opponent seated at start is gone from the roster
    pub fn peer_departed(&self, local: &PlayerId) -> bool {
        match &self.peer {
            Some(peer) => !self.roster.contains(peer),
            None => !self.roster.has_peer_of(local),
        }
    }

    /// (Re)start play from `initial`
    pub(crate) fn start(
        &mut self,
        local: &PlayerId,
        players: Vec<Player>,
        initial: Position,
        now_ms: i64,
    ) {
        self.side = players
            .iter()
            .find(|p| &p.id == local)
            .and_then(|p| p.side);
        self.peer = players
            .iter()
            .find(|p| &p.id != local)
            .map(|p| p.id.clone());
        self.roster.replace(players);
        self.view = Some(LocalGameView::new(initial));
        self.pending.clear();
        self.outcome = None;
        self.phase = Phase::Active;
        self.last_confirmed_at_ms = now_ms;
    }

    /// Terminal transition; any pending action and prediction are dropped
    pub(crate) fn end(&mut self, outcome: Outcome, winning_side: Option<Side>) {
        self.pending.clear();
        if let Some(view) = self.view.as_mut() {
            view.discard_tentative();
        }
        self.outcome = Some((outcome, winning_side));
        self.phase = Phase::Ended;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_last_confirmed_at(&mut self, now_ms: i64) {
        self.last_confirmed_at_ms = now_ms;
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub(crate) fn view_mut(&mut self) -> Option<&mut LocalGameView> {
        self.view.as_mut()
    }

    pub(crate) fn pending_mut(&mut self) -> &mut PendingSlot {
        &mut self.pending
    }
}
