//! The single outstanding optimistic action
//!
//! Only one move may be awaiting the authority's verdict at a time. The
//! slot enforces that: occupying a full slot fails with `ActionPending`.

use crate::AdmissionError;
use rookline_core::Move;

/// A move that has been predicted locally and sent, but not yet resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    /// The move as submitted, promotion choice filled in
    pub mv: Move,
    /// Client time when the move was submitted
    pub client_timestamp_ms: i64,
    /// Time spent thinking since the previous confirmed move
    pub elapsed_think_ms: u64,
    /// The opponent's move was confirmed while this one was in flight
    superseded: bool,
    /// The waiting indicator has been raised for this action
    notified: bool,
}

impl PendingAction {
    /// Create a new pending action
    pub fn new(mv: Move, client_timestamp_ms: i64, elapsed_think_ms: u64) -> Self {
        Self {
            mv,
            client_timestamp_ms,
            elapsed_think_ms,
            superseded: false,
            notified: false,
        }
    }

    /// Whether the authority has already moved the board past this action's base
    pub fn is_superseded(&self) -> bool {
        self.superseded
    }

    /// Milliseconds since submission
    pub fn age_ms(&self, now_ms: i64) -> u64 {
        now_ms.saturating_sub(self.client_timestamp_ms).max(0) as u64
    }

    pub(crate) fn mark_superseded(&mut self) {
        self.superseded = true;
    }

    /// Returns true the first time it is called
    pub(crate) fn mark_notified(&mut self) -> bool {
        !std::mem::replace(&mut self.notified, true)
    }
}

/// Holds at most one [`PendingAction`]
#[derive(Debug, Clone, Default)]
pub struct PendingSlot {
    slot: Option<PendingAction>,
}

impl PendingSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an action
    ///
    /// Returns `Err(ActionPending)` if an action is already outstanding.
    pub fn occupy(&mut self, action: PendingAction) -> Result<(), AdmissionError> {
        if self.slot.is_some() {
            return Err(AdmissionError::ActionPending);
        }
        self.slot = Some(action);
        Ok(())
    }

    /// Remove and return the outstanding action
    pub fn take(&mut self) -> Option<PendingAction> {
        self.slot.take()
    }

    /// The outstanding action
    pub fn get(&self) -> Option<&PendingAction> {
        self.slot.as_ref()
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut PendingAction> {
        self.slot.as_mut()
    }

    /// Check if an action is outstanding
    pub fn is_occupied(&self) -> bool {
        self.slot.is_some()
    }

    /// Drop the outstanding action, if any
    pub fn clear(&mut self) {
        self.slot = None;
    }
}
