//! In-memory doubles for the capability traits

use crate::{Clock, Error, GameStatus, Move, Position, Result, Rules, Square};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A rules engine that only knows the moves it was taught
///
/// Each entry maps (position, origin, destination) to the resulting position.
/// The promotion choice is ignored when looking moves up.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRules {
    moves: HashMap<(String, Square, Square), Position>,
    statuses: HashMap<String, GameStatus>,
}

impl ScriptedRules {
    /// Create an engine with no legal moves
    pub fn new() -> Self {
        Self::default()
    }

    /// Teach a legal move from coordinate notation, e.g. `"e2e4"`
    pub fn with_move(mut self, before: &Position, mv: &str, after: &Position) -> Self {
        self.add_move(before, mv, after);
        self
    }

    /// Teach a legal move in place
    pub fn add_move(&mut self, before: &Position, mv: &str, after: &Position) {
        // Unreadable moves are a bug in the test itself
        let mv = Move::parse(mv).unwrap_or_else(|e| panic!("bad scripted move: {}", e));
        self.moves.insert(
            (before.as_str().to_string(), mv.origin, mv.destination),
            after.clone(),
        );
    }

    /// Mark the status of a position
    pub fn with_status(mut self, position: &Position, status: GameStatus) -> Self {
        self.statuses.insert(position.as_str().to_string(), status);
        self
    }
}

impl Rules for ScriptedRules {
    fn is_legal(&self, position: &Position, mv: &Move) -> bool {
        self.moves
            .contains_key(&(position.as_str().to_string(), mv.origin, mv.destination))
    }

    fn apply_move(&self, position: &Position, mv: &Move) -> Result<Position> {
        self.moves
            .get(&(position.as_str().to_string(), mv.origin, mv.destination))
            .cloned()
            .ok_or_else(|| Error::IllegalMove(mv.to_string()))
    }

    fn status(&self, position: &Position) -> GameStatus {
        self.statuses
            .get(position.as_str())
            .copied()
            .unwrap_or_default()
    }
}

/// A settable clock whose clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_ms)),
        }
    }

    /// Move time forward
    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time
    pub fn set(&self, ms: i64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Well-known positions for tests
pub mod positions {
    use crate::Position;

    pub const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    pub const AFTER_E4_E5: &str =
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";
    pub const AFTER_D4: &str = "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1";

    pub fn start() -> Position {
        Position::start()
    }

    pub fn after_e4() -> Position {
        Position::from_fen_unchecked(AFTER_E4)
    }

    pub fn after_e4_e5() -> Position {
        Position::from_fen_unchecked(AFTER_E4_E5)
    }

    pub fn after_d4() -> Position {
        Position::from_fen_unchecked(AFTER_D4)
    }
}
