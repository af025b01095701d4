//! Turn coordination
//!
//! Tracks whose turn it is, the current phase, the edit countdown, and
//! continuous mode. The coordinator itself is a plain resource with no
//! knowledge of scripts or entities; systems at the bottom of this module
//! wire it into the engine loop.

use bevy::prelude::*;

use crate::actor::{Actor, ActorId};
use crate::events::{EventBus, GameEvent};
use crate::exec::ActiveRun;
use crate::powerup::PowerupState;
use crate::script::parse_script;
use crate::settings::{MatchSettings, ScriptTexts};

/// What the combatant holding the turn is currently doing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnPhase {
    /// Holding the turn, not yet editing
    Idle,
    /// Editing the command script
    Editing,
    /// A script is running
    Executing,
    /// Continuous-mode pause before the next turn fires, counting down
    InterTurn(f32),
    /// Match is decided, nothing moves anymore
    GameOver,
}

/// Who the match went to, and why
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub winner: ActorId,
    pub reason: crate::events::MatchEndReason,
}

#[derive(Resource, Debug)]
pub struct TurnCoordinator {
    pub current: ActorId,
    pub phase: TurnPhase,
    pub continuous: bool,
    pub edit_remaining: f32,
    pub outcome: Option<MatchOutcome>,
}

impl TurnCoordinator {
    pub fn new(edit_time_limit: f32) -> Self {
        Self {
            current: ActorId::A,
            phase: TurnPhase::Idle,
            continuous: false,
            edit_remaining: edit_time_limit,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::GameOver)
    }

    /// Whether `actor` may start executing a script right now
    pub fn can_execute(&self, actor: ActorId) -> bool {
        actor == self.current && matches!(self.phase, TurnPhase::Idle | TurnPhase::Editing)
    }

    /// Whether `actor` may open the script editor right now
    pub fn can_edit(&self, actor: ActorId) -> bool {
        actor == self.current && matches!(self.phase, TurnPhase::Idle)
    }

    pub fn begin_editing(&mut self, actor: ActorId) -> bool {
        if self.can_edit(actor) {
            self.phase = TurnPhase::Editing;
            true
        } else {
            false
        }
    }

    pub fn end_editing(&mut self) {
        if matches!(self.phase, TurnPhase::Editing) {
            self.phase = TurnPhase::Idle;
        }
    }

    pub fn start_execution(&mut self) {
        self.phase = TurnPhase::Executing;
    }

    /// Forfeit the turn without executing. Returns the new holder.
    pub fn pass_turn(&mut self, edit_time_limit: f32) -> ActorId {
        if self.is_over() {
            return self.current;
        }
        self.current = self.current.opponent();
        self.phase = TurnPhase::Idle;
        self.edit_remaining = edit_time_limit;
        self.current
    }

    /// A script finished running. Flips the turn and, in continuous mode,
    /// arms the inter-turn countdown. Returns the new holder.
    pub fn finish_execution(&mut self, settings: &MatchSettings) -> ActorId {
        if self.is_over() {
            return self.current;
        }
        self.current = self.current.opponent();
        self.edit_remaining = settings.edit_time_limit;
        self.phase = if self.continuous {
            TurnPhase::InterTurn(settings.continuous_turn_delay)
        } else {
            TurnPhase::Idle
        };
        self.current
    }

    /// Record a decisive outcome. Returns false if the match was already over.
    pub fn end_match(&mut self, winner: ActorId, reason: crate::events::MatchEndReason) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = TurnPhase::GameOver;
        self.continuous = false;
        self.outcome = Some(MatchOutcome { winner, reason });
        true
    }

    /// Advance the edit countdown. Returns true when it just expired.
    pub fn tick_edit_timer(&mut self, dt: f32) -> bool {
        if !matches!(self.phase, TurnPhase::Idle | TurnPhase::Editing) {
            return false;
        }
        self.edit_remaining -= dt;
        self.edit_remaining <= 0.0
    }
}

/// Requests raised by the outer surface (UI, runner, tests) for the turn
/// systems to pick up on the next update. Drained once per frame.
#[derive(Resource, Debug, Default)]
pub struct TurnRequests {
    pub execute: Option<ActorId>,
    pub begin_edit: Option<ActorId>,
    pub end_edit: bool,
    pub toggle_continuous: bool,
}

impl TurnRequests {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Activate an incoming turn holder: announce the turn and promote any
/// queued powerups.
pub fn begin_turn(actor: ActorId, powerups: &mut PowerupState, bus: &mut EventBus) {
    bus.emit(GameEvent::TurnStart { actor });
    for kind in powerups.promote_queued() {
        bus.emit(GameEvent::PowerupActivated { actor, kind });
    }
}

/// Record a decisive outcome on the coordinator and announce it.
pub fn end_match(
    coord: &mut TurnCoordinator,
    bus: &mut EventBus,
    winner: ActorId,
    reason: crate::events::MatchEndReason,
) {
    if coord.end_match(winner, reason) {
        bus.emit(GameEvent::MatchEnd {
            winner,
            loser: winner.opponent(),
            reason,
        });
    }
}

/// Apply pending turn requests: continuous toggle, edit open/close, and
/// script execution. Requests that are out of turn are dropped.
pub fn handle_turn_requests(
    mut requests: ResMut<TurnRequests>,
    mut coord: ResMut<TurnCoordinator>,
    mut run: ResMut<ActiveRun>,
    scripts: Res<ScriptTexts>,
    mut bus: ResMut<EventBus>,
) {
    if requests.toggle_continuous && !coord.is_over() {
        coord.continuous = !coord.continuous;
        info!("continuous mode: {}", coord.continuous);
    }

    if let Some(actor) = requests.begin_edit {
        if coord.begin_editing(actor) {
            bus.emit(GameEvent::EditBegan { actor });
        } else {
            debug!("{} tried to edit out of turn", actor);
        }
    }

    if requests.end_edit {
        coord.end_editing();
    }

    if let Some(actor) = requests.execute {
        if coord.can_execute(actor) && !run.is_running() {
            let commands = parse_script(scripts.get(actor));
            coord.start_execution();
            bus.emit(GameEvent::ExecuteStart {
                actor,
                steps: commands.len(),
            });
            run.start(actor, commands);
        } else {
            debug!("{} tried to execute out of turn", actor);
        }
    }

    requests.clear();
}

/// Count down the edit timer; on expiry the turn passes untouched.
pub fn tick_turn_timer(
    time: Res<Time>,
    settings: Res<MatchSettings>,
    mut coord: ResMut<TurnCoordinator>,
    mut bus: ResMut<EventBus>,
    mut actors: Query<(&Actor, &mut PowerupState)>,
) {
    if !coord.tick_edit_timer(time.delta_secs()) {
        return;
    }

    let expired = coord.current;
    warn!("{} ran out the edit timer, passing turn", expired);
    bus.emit(GameEvent::TurnTimeout { actor: expired });

    let next = coord.pass_turn(settings.edit_time_limit);
    for (actor, mut powerups) in actors.iter_mut() {
        if actor.0 == next {
            begin_turn(next, &mut powerups, &mut bus);
        }
    }
}

/// Count down the continuous-mode pause; on expiry queue an execute request
/// for the incoming turn holder.
pub fn tick_inter_turn(
    time: Res<Time>,
    mut coord: ResMut<TurnCoordinator>,
    mut requests: ResMut<TurnRequests>,
) {
    if let TurnPhase::InterTurn(remaining) = coord.phase {
        let remaining = remaining - time.delta_secs();
        if remaining <= 0.0 {
            requests.execute = Some(coord.current);
            coord.phase = TurnPhase::Idle;
        } else {
            coord.phase = TurnPhase::InterTurn(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MatchEndReason;

    fn settings() -> MatchSettings {
        MatchSettings::default()
    }

    #[test]
    fn first_turn_belongs_to_a() {
        let coord = TurnCoordinator::new(30.0);
        assert_eq!(coord.current, ActorId::A);
        assert!(coord.can_execute(ActorId::A));
        assert!(!coord.can_execute(ActorId::B));
    }

    #[test]
    fn editing_gates_on_turn_holder() {
        let mut coord = TurnCoordinator::new(30.0);
        assert!(!coord.begin_editing(ActorId::B));
        assert!(coord.begin_editing(ActorId::A));
        assert_eq!(coord.phase, TurnPhase::Editing);
        // still allowed to execute while editing
        assert!(coord.can_execute(ActorId::A));
        // but not to re-open the editor
        assert!(!coord.can_edit(ActorId::A));
    }

    #[test]
    fn finish_execution_flips_and_rearms_timer() {
        let mut coord = TurnCoordinator::new(30.0);
        coord.start_execution();
        coord.edit_remaining = 3.0;
        let next = coord.finish_execution(&settings());
        assert_eq!(next, ActorId::B);
        assert_eq!(coord.phase, TurnPhase::Idle);
        assert_eq!(coord.edit_remaining, settings().edit_time_limit);
    }

    #[test]
    fn continuous_mode_arms_inter_turn_pause() {
        let mut coord = TurnCoordinator::new(30.0);
        coord.continuous = true;
        coord.start_execution();
        coord.finish_execution(&settings());
        assert_eq!(
            coord.phase,
            TurnPhase::InterTurn(settings().continuous_turn_delay)
        );
    }

    #[test]
    fn edit_timer_only_runs_while_holding() {
        let mut coord = TurnCoordinator::new(2.0);
        coord.start_execution();
        assert!(!coord.tick_edit_timer(5.0));
        coord.phase = TurnPhase::Idle;
        assert!(!coord.tick_edit_timer(1.0));
        assert!(coord.tick_edit_timer(1.5));
    }

    #[test]
    fn pass_turn_flips_without_executing() {
        let mut coord = TurnCoordinator::new(2.0);
        let next = coord.pass_turn(2.0);
        assert_eq!(next, ActorId::B);
        assert_eq!(coord.edit_remaining, 2.0);
        assert_eq!(coord.phase, TurnPhase::Idle);
    }

    #[test]
    fn game_over_freezes_the_coordinator() {
        let mut coord = TurnCoordinator::new(30.0);
        coord.continuous = true;
        assert!(coord.end_match(ActorId::A, MatchEndReason::ExitReached));
        assert!(!coord.end_match(ActorId::B, MatchEndReason::HealthDepleted));
        assert!(!coord.continuous);
        assert!(!coord.can_execute(ActorId::A));
        assert_eq!(coord.pass_turn(30.0), ActorId::A);
        assert_eq!(coord.finish_execution(&settings()), ActorId::A);
        let outcome = coord.outcome.unwrap();
        assert_eq!(outcome.winner, ActorId::A);
    }

    #[test]
    fn tick_edit_timer_fires_once_worth_of_expiry() {
        let mut coord = TurnCoordinator::new(1.0);
        assert!(coord.tick_edit_timer(1.0));
        // caller is expected to pass the turn, which rearms
        coord.pass_turn(1.0);
        assert!(!coord.tick_edit_timer(0.5));
    }
}
