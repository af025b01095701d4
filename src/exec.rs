//! Paced script execution
//!
//! Holds the one script run that may be in flight and advances it one
//! command per step-delay tick. Everything a command can touch (movement,
//! shooting, powerup pickup, the exit) resolves here.

use bevy::prelude::*;

use crate::actor::{apply_move, Actor, ActorId, CellPos, Heading, Health, MoveOutcome};
use crate::events::{EventBus, GameEvent, MatchEndReason};
use crate::maze::Maze;
use crate::powerup::{PowerupField, PowerupState};
use crate::radar::{RadarFix, RadarHistory};
use crate::script::{resolve_shot_target, Command};
use crate::settings::MatchSettings;
use crate::turn::{begin_turn, end_match, TurnCoordinator};

/// A parsed script queued against its owner, with a cursor into it
#[derive(Debug)]
pub struct ScriptRun {
    pub actor: ActorId,
    pub commands: Vec<Command>,
    pub cursor: usize,
    pub step_timer: f32,
}

/// At most one script runs at a time
#[derive(Resource, Debug, Default)]
pub struct ActiveRun(pub Option<ScriptRun>);

impl ActiveRun {
    /// Queue a run. The step timer starts spent so the first command fires
    /// on the next update.
    pub fn start(&mut self, actor: ActorId, commands: Vec<Command>) {
        self.0 = Some(ScriptRun {
            actor,
            commands,
            cursor: 0,
            step_timer: 0.0,
        });
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn is_running(&self) -> bool {
        self.0.is_some()
    }
}

/// Advance the active script run by one tick, invoking at most one command.
#[allow(clippy::too_many_arguments)]
pub fn advance_active_run(
    time: Res<Time>,
    settings: Res<MatchSettings>,
    mut run: ResMut<ActiveRun>,
    mut coord: ResMut<TurnCoordinator>,
    mut radar: ResMut<RadarHistory>,
    maze: Res<Maze>,
    mut field: ResMut<PowerupField>,
    mut bus: ResMut<EventBus>,
    mut actors: Query<(
        &Actor,
        &mut CellPos,
        &mut Heading,
        &mut Health,
        &mut PowerupState,
    )>,
) {
    let Some(script) = run.0.as_mut() else {
        return;
    };

    if coord.is_over() {
        run.clear();
        return;
    }

    script.step_timer -= time.delta_secs();
    if script.step_timer > 0.0 {
        return;
    }

    let mut me = None;
    let mut opp = None;
    for entry in actors.iter_mut() {
        if entry.0 .0 == script.actor {
            me = Some(entry);
        } else {
            opp = Some(entry);
        }
    }
    let (Some((_, mut my_pos, mut my_heading, _, mut my_powerups)), Some(opp)) = (me, opp) else {
        warn!("script run for {} has no matching entities", script.actor);
        run.clear();
        return;
    };
    let (_, opp_pos, opp_heading, mut opp_health, _) = opp;

    // run complete: seal the turn and hand over
    if script.cursor >= script.commands.len() {
        let actor = script.actor;
        radar.record_turn_end(actor, RadarFix::new(my_pos.0, my_heading.0));
        my_powerups.clear_active();
        let next = coord.finish_execution(&settings);
        run.clear();

        // the opponent's queued powerups come online as their turn starts
        for entry in actors.iter_mut() {
            if entry.0 .0 == next {
                let (_, _, _, _, mut powerups) = entry;
                begin_turn(next, &mut powerups, &mut bus);
            }
        }
        return;
    }

    let actor = script.actor;
    let command = script.commands[script.cursor].clone();
    let pre_pos = my_pos.0;
    let pre_facing = my_heading.0;

    match command {
        Command::Move(dir) => {
            let outcome = apply_move(
                maze.grid(),
                &mut my_pos.0,
                &mut my_heading.0,
                &mut my_powerups,
                dir,
            );
            if outcome == MoveOutcome::Blocked {
                debug!("{} move {:?} blocked at {:?}", actor, dir, my_pos.0);
            }
        }
        Command::Wait => {}
        Command::Shoot { modifiers } => {
            let live = RadarFix::new(opp_pos.0, opp_heading.0);
            let fix = radar.query(actor, live, &mut my_powerups);
            let target = resolve_shot_target(fix.pos, fix.facing, &modifiers);
            let hit = opp_pos.0 == target;
            bus.emit(GameEvent::ShotFired {
                shooter: actor,
                target: (target.x, target.y),
                hit,
            });
            if hit {
                let remaining = opp_health.take_damage(settings.shot_damage);
                bus.emit(GameEvent::DamageTaken {
                    actor: actor.opponent(),
                    amount: settings.shot_damage,
                    remaining,
                });
                if opp_health.is_dead() {
                    end_match(&mut coord, &mut bus, actor, MatchEndReason::HealthDepleted);
                }
            }
        }
    }

    if my_pos.0 != pre_pos || my_heading.0 != pre_facing {
        bus.emit(GameEvent::PositionMoved {
            actor,
            from: (pre_pos.x, pre_pos.y),
            from_facing: pre_facing,
        });
    }

    if my_pos.0 != pre_pos {
        if let Some(kind) = field.take_at(my_pos.0) {
            my_powerups.collect(kind);
            bus.emit(GameEvent::PowerupCollected { actor, kind });
        }
        if maze.grid().exit_at(my_pos.0) {
            end_match(&mut coord, &mut bus, actor, MatchEndReason::ExitReached);
        }
    }

    if coord.is_over() {
        run.clear();
        return;
    }

    if let Some(script) = run.0.as_mut() {
        script.cursor += 1;
        script.step_timer = settings.step_delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ShotModifier;

    #[test]
    fn start_arms_a_run_with_spent_timer() {
        let mut run = ActiveRun::default();
        assert!(!run.is_running());
        run.start(ActorId::A, vec![Command::Wait, Command::Wait]);
        assert!(run.is_running());
        let script = run.0.as_ref().unwrap();
        assert_eq!(script.cursor, 0);
        assert_eq!(script.step_timer, 0.0);
        assert_eq!(script.commands.len(), 2);
    }

    #[test]
    fn clear_drops_the_run() {
        let mut run = ActiveRun::default();
        run.start(
            ActorId::B,
            vec![Command::Shoot {
                modifiers: vec![ShotModifier::StepForward],
            }],
        );
        run.clear();
        assert!(!run.is_running());
    }
}
