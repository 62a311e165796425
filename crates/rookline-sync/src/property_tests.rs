//! Property-based tests for the sync core
//!
//! Drives a [`SyncCore`] through random interleavings of local gestures and
//! authority events and checks the state-machine invariants after every step.

use crate::{Gate, Phase, SyncConfig, SyncCore, SyncState};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rookline_core::testing::{positions, ManualClock, ScriptedRules};
use rookline_core::{
    ActionAccepted, Move, Outcome, Player, PlayerId, Position, RoomId, ServerEvent, Side,
};

// ============================================================================
// Fixtures
// ============================================================================

const MOVES: [&str; 5] = ["e2e4", "d2d4", "e7e5", "e2e5", "g1f3"];

fn position(index: usize) -> Position {
    match index % 4 {
        0 => positions::start(),
        1 => positions::after_e4(),
        2 => positions::after_e4_e5(),
        _ => positions::after_d4(),
    }
}

fn rules() -> ScriptedRules {
    ScriptedRules::new()
        .with_move(&positions::start(), "e2e4", &positions::after_e4())
        .with_move(&positions::start(), "d2d4", &positions::after_d4())
        .with_move(&positions::after_e4(), "e7e5", &positions::after_e4_e5())
}

fn started() -> ServerEvent {
    ServerEvent::SessionStarted {
        room_id: RoomId::new("R1"),
        players: vec![
            Player::new("a", "Alice").with_side(Side::White),
            Player::new("b", "Bob").with_side(Side::Black),
        ],
        initial_position: None,
    }
}

fn active_core(local: &str) -> (SyncCore<ScriptedRules, ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    let mut core = SyncCore::new(PlayerId::new(local), rules(), clock.clone(), SyncConfig::default());
    core.join_session("R1", local).unwrap();
    core.handle_event(started());
    (core, clock)
}

// ============================================================================
// Strategy Generators
// ============================================================================

/// One input to the core
#[derive(Debug, Clone)]
enum Step {
    Submit(usize),
    Confirm { by_peer: bool, position: usize },
    Reject,
    Check,
    End { interrupted: bool },
    Restart,
    PeerLeaves,
    Leave,
    Wait(i64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..MOVES.len()).prop_map(Step::Submit),
        3 => (any::<bool>(), 0..4usize)
            .prop_map(|(by_peer, position)| Step::Confirm { by_peer, position }),
        2 => Just(Step::Reject),
        1 => Just(Step::Check),
        1 => any::<bool>().prop_map(|interrupted| Step::End { interrupted }),
        1 => Just(Step::Restart),
        1 => Just(Step::PeerLeaves),
        1 => Just(Step::Leave),
        1 => (0..5_000i64).prop_map(Step::Wait),
    ]
}

fn steps_strategy(max_steps: usize) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step_strategy(), 1..max_steps)
}

// ============================================================================
// Invariants
// ============================================================================

fn check_invariants(core: &SyncCore<ScriptedRules, ManualClock>) -> Result<(), TestCaseError> {
    // A prediction is always backed by a pending action
    if let Some(view) = core.view() {
        if view.is_tentative() {
            prop_assert!(core.is_predicting());
        }
    }

    // Only an active session can have a move in flight
    if core.phase() != Phase::Active {
        prop_assert!(!core.is_predicting());
    }

    match core.state() {
        SyncState::Idle => {
            prop_assert!(core.context().is_none());
            prop_assert!(core.view().is_none());
        }
        SyncState::Active { predicting } => {
            prop_assert_eq!(predicting, core.is_predicting());
            prop_assert!(core.view().is_some());
        }
        SyncState::AwaitingPeer | SyncState::Ended => {}
    }

    Ok(())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Invariants hold after every step of any interleaving
    #[test]
    fn sync_invariants_hold(steps in steps_strategy(60), local_is_white in any::<bool>()) {
        let local = if local_is_white { "a" } else { "b" };
        let peer = if local_is_white { "b" } else { "a" };
        let (mut core, clock) = active_core(local);
        let mut sequence = 0u64;

        for step in steps {
            let gate_before = core.gate().evaluate();
            let active_before = core.phase() == Phase::Active;
            let predicting_before = core.is_predicting();

            match step {
                Step::Submit(index) => {
                    let mv = Move::parse(MOVES[index]).unwrap();
                    let before = core.view().map(|v| v.current().clone());
                    match core.submit_move(mv) {
                        Ok(cmd) => {
                            // Admission implies the gate was open
                            prop_assert!(gate_before.is_allowed());
                            prop_assert!(core.is_predicting());
                            prop_assert_eq!(cmd.requests().len(), 1);
                        }
                        Err(reason) => {
                            if let Gate::Denied(expected) = gate_before {
                                prop_assert_eq!(reason, expected);
                            }
                            // Refusals change nothing
                            prop_assert_eq!(core.is_predicting(), predicting_before);
                            prop_assert_eq!(core.view().map(|v| v.current().clone()), before);
                        }
                    }
                }
                Step::Confirm { by_peer, position: index } => {
                    sequence += 1;
                    let by = if by_peer { peer } else { local };
                    let accepted = ActionAccepted::new(position(index), "x", sequence).by(by);
                    core.handle_event(ServerEvent::ActionAccepted(accepted));
                    if active_before {
                        // The authority's position replaces any prediction
                        let view = core.view().unwrap();
                        prop_assert_eq!(view.current(), &position(index));
                        prop_assert!(!view.is_tentative());
                        if !by_peer {
                            prop_assert!(!core.is_predicting());
                        }
                    }
                }
                Step::Reject => {
                    let confirmed = core.view().map(|v| v.confirmed().clone());
                    core.handle_event(ServerEvent::rejected("stale-turn"));
                    if active_before {
                        prop_assert!(!core.is_predicting());
                        prop_assert_eq!(core.view().map(|v| v.current().clone()), confirmed);
                    }
                }
                Step::Check => {
                    core.handle_event(ServerEvent::CheckNotice);
                    prop_assert_eq!(core.is_predicting(), predicting_before);
                }
                Step::End { interrupted } => {
                    let outcome = if interrupted { Outcome::Interrupted } else { Outcome::Draw };
                    core.handle_event(ServerEvent::ended(outcome, None));
                    if core.context().is_some() {
                        prop_assert_eq!(core.state(), SyncState::Ended);
                    }
                }
                Step::Restart => {
                    core.handle_event(started());
                    if core.context().is_some() {
                        prop_assert_eq!(core.state(), SyncState::Active { predicting: false });
                        prop_assert!(core.view().is_some_and(|v| v.history().is_empty()));
                    }
                }
                Step::PeerLeaves => {
                    core.handle_event(ServerEvent::MembershipChanged {
                        players: vec![Player::new(local, local)],
                    });
                    if active_before {
                        prop_assert_eq!(core.state(), SyncState::Ended);
                    }
                }
                Step::Leave => {
                    core.leave_session();
                    prop_assert_eq!(core.state(), SyncState::Idle);
                    // Leaving twice is a no-op
                    prop_assert!(core.leave_session().is_none());
                }
                Step::Wait(ms) => {
                    clock.advance(ms);
                    core.poll();
                    // The indicator is raised at most once per move
                    prop_assert!(core.poll().is_none());
                }
            }

            check_invariants(&core)?;
        }
    }

    /// Once every pending move is resolved the view equals the confirmed state
    #[test]
    fn resolution_converges(verdicts in prop::collection::vec(any::<bool>(), 1..20)) {
        let (mut core, _) = active_core("a");
        let mut sequence = 0u64;

        for accept in verdicts {
            let confirmed = core.view().unwrap().confirmed().clone();
            let Ok(_) = core.submit_move(Move::parse("e2e4").unwrap()) else {
                // Only the start position has a scripted white move
                break;
            };

            if accept {
                sequence += 1;
                core.handle_event(ServerEvent::ActionAccepted(
                    ActionAccepted::new(positions::start(), "e4", sequence).by("a"),
                ));
            } else {
                core.handle_event(ServerEvent::rejected("illegal"));
                prop_assert_eq!(core.view().unwrap().current(), &confirmed);
            }

            let view = core.view().unwrap();
            prop_assert!(!core.is_predicting());
            prop_assert!(!view.is_tentative());
            prop_assert_eq!(view.current(), view.confirmed());
            prop_assert_eq!(view.history().len() as u64, sequence);
        }
    }
}
