//! Two-generation radar ledger: the heart of imperfect-information targeting
//!
//! Each completed turn pushes a position/facing fix into that actor's
//! depth-2 ring. A radar query answers with the opponent's *older*
//! generation, so intelligence is always one full turn stale. The one
//! exception is an active TrueRadar powerup, which answers with the live
//! fix and is consumed by that single query.

use bevy::prelude::*;

use crate::actor::{ActorId, Facing};
use crate::powerup::PowerupState;

/// A recorded (position, facing) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarFix {
    pub pos: IVec2,
    pub facing: Facing,
}

impl RadarFix {
    pub fn new(pos: IVec2, facing: Facing) -> Self {
        Self { pos, facing }
    }
}

/// Depth-2 ring of end-of-turn fixes per actor
#[derive(Resource, Debug, Clone)]
pub struct RadarHistory {
    // [actor][0] = most recent completed turn, [actor][1] = the one before
    slots: [[RadarFix; 2]; 2],
}

impl RadarHistory {
    /// Both generations start at the spawn fix, so a first-turn radar query
    /// is well-defined.
    pub fn new(spawn_a: RadarFix, spawn_b: RadarFix) -> Self {
        Self {
            slots: [[spawn_a; 2], [spawn_b; 2]],
        }
    }

    /// Push `fix` as `actor`'s freshest end-of-turn generation
    pub fn record_turn_end(&mut self, actor: ActorId, fix: RadarFix) {
        let ring = &mut self.slots[actor.index()];
        ring[1] = ring[0];
        ring[0] = fix;
    }

    pub fn last_end(&self, actor: ActorId) -> RadarFix {
        self.slots[actor.index()][0]
    }

    pub fn prev_end(&self, actor: ActorId) -> RadarFix {
        self.slots[actor.index()][1]
    }

    /// Answer a radar query from `requester` about their opponent.
    ///
    /// `opponent_live` is the opponent's current fix; it is only revealed
    /// when the requester's TrueRadar flag is active, and that flag is
    /// cleared by exactly one query.
    pub fn query(
        &self,
        requester: ActorId,
        opponent_live: RadarFix,
        requester_powerups: &mut PowerupState,
    ) -> RadarFix {
        if requester_powerups.active_true_radar {
            requester_powerups.active_true_radar = false;
            debug!("{} spent TrueRadar, live fix revealed", requester);
            return opponent_live;
        }
        self.prev_end(requester.opponent())
    }
}

impl Default for RadarHistory {
    fn default() -> Self {
        let origin = RadarFix::new(IVec2::ZERO, Facing::North);
        Self::new(origin, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(x: i32, y: i32) -> RadarFix {
        RadarFix::new(IVec2::new(x, y), Facing::North)
    }

    #[test]
    fn record_shifts_last_into_prev() {
        let mut history = RadarHistory::new(fix(0, 0), fix(5, 5));
        history.record_turn_end(ActorId::A, fix(1, 0));
        history.record_turn_end(ActorId::A, fix(2, 0));

        assert_eq!(history.last_end(ActorId::A), fix(2, 0));
        assert_eq!(history.prev_end(ActorId::A), fix(1, 0));
        // B's ring untouched
        assert_eq!(history.last_end(ActorId::B), fix(5, 5));
    }

    #[test]
    fn query_is_one_turn_stale() {
        let mut history = RadarHistory::new(fix(0, 0), fix(5, 5));
        history.record_turn_end(ActorId::B, fix(6, 5));
        history.record_turn_end(ActorId::B, fix(7, 5));

        let mut powerups = PowerupState::default();
        let seen = history.query(ActorId::A, fix(8, 5), &mut powerups);
        assert_eq!(seen, fix(6, 5), "must return prev, not last or live");
    }

    #[test]
    fn true_radar_reveals_live_exactly_once() {
        let mut history = RadarHistory::new(fix(0, 0), fix(5, 5));
        history.record_turn_end(ActorId::B, fix(6, 5));

        let mut powerups = PowerupState {
            active_true_radar: true,
            ..Default::default()
        };

        let live = fix(9, 9);
        assert_eq!(history.query(ActorId::A, live, &mut powerups), live);
        assert!(!powerups.active_true_radar);

        // Second query falls back to the stale ledger
        assert_eq!(history.query(ActorId::A, live, &mut powerups), fix(5, 5));
    }
}
