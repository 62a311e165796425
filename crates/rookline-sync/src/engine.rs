//! The synchronization core
//!
//! Applies local moves before the authority confirms them and reconciles
//! with the authority's verdict. Every input (a gesture, a session request,
//! or one inbound [`ServerEvent`]) is processed to completion before the next
//! one, and every call returns the [`Cmd`] the application should run.

use crate::{
    AdmissionError, ClientSessionContext, Cmd, LocalGameView, Notice, PendingAction, Phase,
    SessionError, SyncConfig, SyncState, TurnGate,
};
use rookline_core::{
    ActionAccepted, ActionRequest, ClientRequest, Clock, Move, Outcome, Player, PlayerId,
    Position, RoomId, Roster, Rules, ServerEvent, Side,
};
use tracing::{debug, trace, warn};

/// The create/join request waiting for its reply
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outstanding {
    Create { display_name: String },
    Join { room_id: RoomId, display_name: String },
}

/// Client-side session state machine with optimistic move prediction
///
/// Generic over the rules engine `R` used for local prediction and the
/// clock `K` used for telemetry timestamps.
pub struct SyncCore<R: Rules, K: Clock> {
    local_player: PlayerId,
    rules: R,
    clock: K,
    config: SyncConfig,
    /// Present from create/join acknowledgement until leave
    context: Option<ClientSessionContext>,
    outstanding: Option<Outstanding>,
}

impl<R: Rules, K: Clock> SyncCore<R, K> {
    /// Create an idle core for the player the transport identified as `local_player`
    pub fn new(local_player: PlayerId, rules: R, clock: K, config: SyncConfig) -> Self {
        Self {
            local_player,
            rules,
            clock,
            config,
            context: None,
            outstanding: None,
        }
    }

    // ── Session requests ────────────────────────────────────────────

    /// Ask the authority for a new room
    pub fn create_session(&mut self, display_name: &str) -> Result<Cmd, SessionError> {
        self.ensure_can_request()?;
        let display_name = self.config.display_name_or_default(display_name);
        debug!(name = %display_name, "requesting new room");
        self.outstanding = Some(Outstanding::Create {
            display_name: display_name.clone(),
        });
        Ok(Cmd::send(ClientRequest::CreateSession { display_name }))
    }

    /// Ask the authority to seat this client in `room_id`
    pub fn join_session(
        &mut self,
        room_id: impl Into<RoomId>,
        display_name: &str,
    ) -> Result<Cmd, SessionError> {
        let room_id = room_id.into();
        if room_id.is_blank() {
            return Err(SessionError::MissingRoomId);
        }
        self.ensure_can_request()?;
        let display_name = self.config.display_name_or_default(display_name);
        debug!(room = %room_id, name = %display_name, "requesting to join room");
        self.outstanding = Some(Outstanding::Join {
            room_id: room_id.clone(),
            display_name: display_name.clone(),
        });
        Ok(Cmd::send(ClientRequest::JoinSession {
            room_id,
            display_name,
        }))
    }

    /// Leave the current room
    ///
    /// Always ends in `Idle`, from any phase, without waiting for the
    /// authority. Calling it with no session is a no-op.
    pub fn leave_session(&mut self) -> Cmd {
        self.outstanding = None;
        match self.context.take() {
            Some(ctx) => {
                let room_id = ctx.room_id().clone();
                debug!(room = %room_id, phase = ?ctx.phase(), "leaving room");
                Cmd::batch(vec![
                    Cmd::send(ClientRequest::LeaveSession {
                        room_id: room_id.clone(),
                    }),
                    Cmd::notify(Notice::Left { room_id }),
                ])
            }
            None => Cmd::none(),
        }
    }

    fn ensure_can_request(&self) -> Result<(), SessionError> {
        if let Some(ctx) = &self.context {
            return Err(SessionError::AlreadyInSession(ctx.room_id().clone()));
        }
        if self.outstanding.is_some() {
            return Err(SessionError::RequestInFlight);
        }
        Ok(())
    }

    // ── Local moves ─────────────────────────────────────────────────

    /// Admit, predict and submit a local move
    ///
    /// On success the prediction is already part of the view and the
    /// returned command sends the action and renders the predicted board.
    /// On failure nothing changes.
    pub fn submit_move(&mut self, mv: Move) -> Result<Cmd, AdmissionError> {
        let now = self.clock.now_ms();
        let ctx = self
            .context
            .as_mut()
            .ok_or(AdmissionError::NoActiveSession)?;

        let gate = ctx.gate();
        let base = ctx
            .view()
            .map(|view| view.current().clone())
            .ok_or(AdmissionError::NoActiveSession)?;
        if let Err(reason) = gate.admit(&self.rules, &base, &mv) {
            debug!(%mv, %reason, "move refused locally");
            return Err(reason);
        }

        let mv = Move {
            promotion: Some(mv.promotion.unwrap_or(self.config.default_promotion)),
            ..mv
        };
        let predicted = self.rules.apply_move(&base, &mv).map_err(|e| {
            debug!(%mv, error = %e, "rules engine could not apply an admitted move");
            AdmissionError::IllegalMove
        })?;

        let elapsed_think_ms = now.saturating_sub(ctx.last_confirmed_at_ms()).max(0) as u64;
        ctx.pending_mut()
            .occupy(PendingAction::new(mv, now, elapsed_think_ms))?;
        if let Some(view) = ctx.view_mut() {
            view.predict(predicted.clone());
        }

        debug!(room = %ctx.room_id(), %mv, elapsed_think_ms, "move predicted and submitted");
        let request = ClientRequest::SubmitAction(ActionRequest {
            room_id: ctx.room_id().clone(),
            origin: mv.origin,
            destination: mv.destination,
            promotion: mv.promotion,
            client_timestamp_ms: now,
            elapsed_think_ms,
        });
        let orientation = orientation(&self.config, ctx.side());
        Ok(Cmd::batch(vec![
            Cmd::send(request),
            Cmd::Render {
                position: predicted,
                orientation,
            },
        ]))
    }

    /// Raise the waiting indicator for a long-unconfirmed move
    ///
    /// The core never resolves a pending move on its own; this only informs.
    pub fn poll(&mut self) -> Cmd {
        let now = self.clock.now_ms();
        let threshold = self.config.confirmation_notice_after_ms;
        let Some(ctx) = self.context.as_mut() else {
            return Cmd::none();
        };
        let Some(pending) = ctx.pending_mut().get_mut() else {
            return Cmd::none();
        };
        if pending.age_ms(now) >= threshold && pending.mark_notified() {
            debug!(mv = %pending.mv, "move still awaiting confirmation");
            return Cmd::notify(Notice::AwaitingConfirmation);
        }
        Cmd::none()
    }

    /// Roll back a move whose request never reached the authority
    ///
    /// Clears the pending slot and the prediction and renders the last
    /// confirmed board. A no-op when nothing is pending.
    pub fn abandon_pending(&mut self) -> Cmd {
        let Some(ctx) = Self::active_context(&mut self.context, None) else {
            return Cmd::none();
        };
        let Some(action) = ctx.pending_mut().take() else {
            return Cmd::none();
        };
        if let Some(view) = ctx.view_mut() {
            view.discard_tentative();
        }
        warn!(mv = %action.mv, "abandoned unsent move; restored confirmed position");
        let orientation = orientation(&self.config, ctx.side());
        Self::render_confirmed(ctx, orientation)
    }

    /// Forget a create/join request that never reached the authority
    pub fn abandon_request(&mut self) {
        if let Some(request) = self.outstanding.take() {
            warn!(?request, "abandoned unsent session request");
        }
    }

    // ── Inbound events ──────────────────────────────────────────────

    /// Apply one event from the authority
    pub fn handle_event(&mut self, event: ServerEvent) -> Cmd {
        trace!(kind = event.kind(), "server event");
        match event {
            ServerEvent::SessionCreated { room_id } => self.on_session_created(room_id),
            ServerEvent::CreateFailed { reason } => self.on_create_failed(reason),
            ServerEvent::JoinAccepted { room_id } => self.on_join_accepted(room_id),
            ServerEvent::JoinRejected { reason } => self.on_join_rejected(reason),
            ServerEvent::SessionStarted {
                room_id,
                players,
                initial_position,
            } => self.on_session_started(room_id, players, initial_position),
            ServerEvent::ActionAccepted(accepted) => self.on_action_accepted(accepted),
            ServerEvent::ActionRejected { room_id, reason } => {
                self.on_action_rejected(room_id, reason)
            }
            ServerEvent::CheckNotice => self.on_check_notice(),
            ServerEvent::SessionEnded {
                room_id,
                outcome,
                winning_side,
            } => self.on_session_ended(room_id, outcome, winning_side),
            ServerEvent::MembershipChanged { players } => self.on_membership_changed(players),
        }
    }

    fn on_session_created(&mut self, room_id: RoomId) -> Cmd {
        match self.outstanding.take() {
            Some(Outstanding::Create { display_name }) => {
                debug!(room = %room_id, "room created");
                self.context = Some(ClientSessionContext::new(
                    room_id.clone(),
                    display_name,
                    Phase::Created,
                    self.clock.now_ms(),
                ));
                Cmd::notify(Notice::RoomCreated { room_id })
            }
            other => {
                warn!(room = %room_id, "ignoring unsolicited room creation reply");
                self.outstanding = other;
                Cmd::none()
            }
        }
    }

    fn on_create_failed(&mut self, reason: Option<String>) -> Cmd {
        match self.outstanding.take() {
            Some(Outstanding::Create { .. }) => {
                debug!(?reason, "room creation failed");
                Cmd::notify(Notice::CreateFailed { reason })
            }
            other => {
                warn!("ignoring unsolicited room creation failure");
                self.outstanding = other;
                Cmd::none()
            }
        }
    }

    fn on_join_accepted(&mut self, room_id: RoomId) -> Cmd {
        match self.outstanding.take() {
            Some(Outstanding::Join {
                room_id: requested,
                display_name,
            }) => {
                if requested != room_id {
                    warn!(%requested, reply = %room_id, "join reply names another room; keeping the requested one");
                }
                debug!(room = %requested, "joined room");
                self.context = Some(ClientSessionContext::new(
                    requested.clone(),
                    display_name,
                    Phase::Waiting,
                    self.clock.now_ms(),
                ));
                Cmd::notify(Notice::Joined { room_id: requested })
            }
            other => {
                warn!(room = %room_id, "ignoring unsolicited join reply");
                self.outstanding = other;
                Cmd::none()
            }
        }
    }

    fn on_join_rejected(&mut self, reason: Option<String>) -> Cmd {
        match self.outstanding.take() {
            Some(Outstanding::Join { room_id, .. }) => {
                debug!(room = %room_id, ?reason, "join refused");
                Cmd::notify(Notice::JoinFailed { reason })
            }
            other => {
                warn!("ignoring unsolicited join refusal");
                self.outstanding = other;
                Cmd::none()
            }
        }
    }

    fn on_session_started(
        &mut self,
        room_id: RoomId,
        players: Vec<Player>,
        initial_position: Option<Position>,
    ) -> Cmd {
        let now = self.clock.now_ms();

        // The start broadcast may overtake the reply to our own join
        if let Some(Outstanding::Join {
            room_id: requested,
            display_name,
        }) = &self.outstanding
        {
            if *requested == room_id && self.context.is_none() {
                debug!(room = %room_id, "session started before join reply");
                self.context = Some(ClientSessionContext::new(
                    room_id.clone(),
                    display_name.clone(),
                    Phase::Waiting,
                    now,
                ));
                self.outstanding = None;
            }
        }

        let Some(ctx) = self.context.as_mut() else {
            warn!(room = %room_id, "ignoring session start with no session");
            return Cmd::none();
        };
        if *ctx.room_id() != room_id {
            warn!(room = %room_id, current = %ctx.room_id(), "ignoring session start for another room");
            return Cmd::none();
        }

        let initial = initial_position.unwrap_or_else(Position::start);
        ctx.start(&self.local_player, players, initial.clone(), now);
        let side = ctx.side();
        if side.is_none() {
            warn!(room = %room_id, player = %self.local_player, "local player not seated in started session");
        }
        debug!(room = %room_id, ?side, "session active");

        Cmd::batch(vec![
            Cmd::Render {
                position: initial,
                orientation: orientation(&self.config, side),
            },
            Cmd::ShowMoves(String::new()),
            Cmd::notify(Notice::GameStarted { side }),
        ])
    }

    fn on_action_accepted(&mut self, accepted: ActionAccepted) -> Cmd {
        let now = self.clock.now_ms();
        let local = &self.local_player;
        let Some(ctx) = Self::active_context(&mut self.context, accepted.room_id.as_ref()) else {
            warn!(seq = accepted.sequence_number, "ignoring late move confirmation");
            return Cmd::none();
        };
        let stale = ctx
            .view()
            .map_or(true, |view| view.is_stale(accepted.sequence_number));
        if stale {
            warn!(seq = accepted.sequence_number, "ignoring stale move confirmation");
            return Cmd::none();
        }

        let by_peer = accepted.player_id.as_ref().is_some_and(|id| id != local);
        if let Some(view) = ctx.view_mut() {
            view.apply_confirmation(&accepted);
        }
        ctx.set_last_confirmed_at(now);

        if by_peer {
            // The slot stays occupied until the authority rules on our move
            if let Some(action) = ctx.pending_mut().get_mut() {
                debug!(mv = %action.mv, "opponent move confirmed while ours was in flight");
                action.mark_superseded();
            }
        } else if ctx.pending_mut().take().is_some() {
            debug!(seq = accepted.sequence_number, "pending move confirmed");
        } else {
            debug!(seq = accepted.sequence_number, "opponent move confirmed");
        }

        let orientation = orientation(&self.config, ctx.side());
        Self::render_confirmed(ctx, orientation)
    }

    fn on_action_rejected(&mut self, room_id: Option<RoomId>, reason: Option<String>) -> Cmd {
        let Some(ctx) = Self::active_context(&mut self.context, room_id.as_ref()) else {
            warn!(?reason, "ignoring late move rejection");
            return Cmd::none();
        };
        let Some(action) = ctx.pending_mut().take() else {
            warn!(?reason, "ignoring move rejection with nothing pending");
            return Cmd::none();
        };
        if let Some(view) = ctx.view_mut() {
            view.discard_tentative();
        }

        let reason = reason.unwrap_or_else(|| "illegal".to_string());
        debug!(mv = %action.mv, %reason, "pending move rejected; restored confirmed position");
        let orientation = orientation(&self.config, ctx.side());
        Cmd::batch(vec![
            Self::render_confirmed(ctx, orientation),
            Cmd::notify(Notice::MoveRejected { reason }),
        ])
    }

    fn on_check_notice(&mut self) -> Cmd {
        match self.phase() {
            Phase::Active => Cmd::notify(Notice::Check),
            _ => Cmd::none(),
        }
    }

    fn on_session_ended(
        &mut self,
        room_id: Option<RoomId>,
        outcome: Outcome,
        winning_side: Option<Side>,
    ) -> Cmd {
        // Only a game in progress can end
        let Some(ctx) = Self::active_context(&mut self.context, room_id.as_ref()) else {
            warn!(?outcome, "ignoring session end outside an active game");
            return Cmd::none();
        };

        if ctx.pending().is_occupied() {
            debug!("discarding pending move at session end");
        }
        ctx.end(outcome, winning_side);
        debug!(room = %ctx.room_id(), ?outcome, ?winning_side, "session ended");

        let notice = match outcome {
            Outcome::Interrupted => Notice::SessionInterrupted,
            _ => Notice::GameOver {
                outcome,
                winning_side,
            },
        };
        let orientation = orientation(&self.config, ctx.side());
        Cmd::batch(vec![
            Self::render_confirmed(ctx, orientation),
            Cmd::notify(notice),
        ])
    }

    fn on_membership_changed(&mut self, players: Vec<Player>) -> Cmd {
        let local = &self.local_player;
        let Some(ctx) = self.context.as_mut() else {
            debug!("ignoring roster update with no session");
            return Cmd::none();
        };
        ctx.roster_mut().replace(players);
        let names: Vec<String> = ctx.roster().names().into_iter().map(String::from).collect();
        let roster_notice = Cmd::notify(Notice::RosterChanged { names });

        match ctx.phase() {
            Phase::Created if ctx.roster().has_peer_of(local) => {
                debug!(room = %ctx.room_id(), "opponent arrived");
                ctx.set_phase(Phase::Waiting);
                roster_notice
            }
            Phase::Active if ctx.peer_departed(local) => {
                debug!(room = %ctx.room_id(), "opponent left mid-game");
                ctx.end(Outcome::Interrupted, None);
                let orientation = orientation(&self.config, ctx.side());
                Cmd::batch(vec![
                    roster_notice,
                    Self::render_confirmed(ctx, orientation),
                    Cmd::notify(Notice::SessionInterrupted),
                ])
            }
            _ => roster_notice,
        }
    }

    /// The context if it is active and (when named) in `room_id`
    fn active_context<'a>(
        context: &'a mut Option<ClientSessionContext>,
        room_id: Option<&RoomId>,
    ) -> Option<&'a mut ClientSessionContext> {
        context.as_mut().filter(|ctx| {
            ctx.phase() == Phase::Active && room_id.map_or(true, |id| id == ctx.room_id())
        })
    }

    fn render_confirmed(ctx: &ClientSessionContext, orientation: Side) -> Cmd {
        match ctx.view() {
            Some(view) => Cmd::batch(vec![
                Cmd::Render {
                    position: view.confirmed().clone(),
                    orientation,
                },
                Cmd::ShowMoves(view.movetext()),
            ]),
            None => Cmd::none(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Identity of the local player
    pub fn local_player(&self) -> &PlayerId {
        &self.local_player
    }

    /// Replace the local identity, e.g. after the transport reconnects
    ///
    /// Only takes effect for sessions started afterwards.
    pub fn set_local_player(&mut self, local_player: PlayerId) {
        self.local_player = local_player;
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// The session context, if any
    pub fn context(&self) -> Option<&ClientSessionContext> {
        self.context.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.context.as_ref().map_or(Phase::Idle, |ctx| ctx.phase())
    }

    pub fn state(&self) -> SyncState {
        self.context
            .as_ref()
            .map_or(SyncState::Idle, ClientSessionContext::state)
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.context.as_ref().map(|ctx| ctx.room_id())
    }

    pub fn side(&self) -> Option<Side> {
        self.context.as_ref().and_then(|ctx| ctx.side())
    }

    pub fn view(&self) -> Option<&LocalGameView> {
        self.context.as_ref().and_then(|ctx| ctx.view())
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.context.as_ref().and_then(|ctx| ctx.pending().get())
    }

    /// Whether a move is awaiting the authority's verdict
    pub fn is_predicting(&self) -> bool {
        self.pending().is_some()
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.context.as_ref().map(|ctx| ctx.roster())
    }

    pub fn outcome(&self) -> Option<(Outcome, Option<Side>)> {
        self.context.as_ref().and_then(|ctx| ctx.outcome())
    }

    /// Current turn gate inputs
    pub fn gate(&self) -> TurnGate {
        self.context.as_ref().map_or(
            TurnGate {
                phase: Phase::Idle,
                side: None,
                turn: None,
                pending: false,
            },
            ClientSessionContext::gate,
        )
    }

    /// Whether a create/join request is awaiting its reply
    pub fn has_request_in_flight(&self) -> bool {
        self.outstanding.is_some()
    }
}

/// Board orientation for the local `side`
fn orientation(config: &SyncConfig, side: Option<Side>) -> Side {
    match side {
        Some(side) if config.orient_to_side => side,
        _ => Side::White,
    }
}
