//! Grid movement rules: walls, bounds, and the Phase powerup
//!
//! A move always turns the combatant toward the attempted direction, even
//! when the step itself is blocked. The executor reads the facing change
//! and reports it like any other delta.

use bevy::prelude::*;

use crate::maze::GridProvider;
use crate::powerup::PowerupState;

use super::components::{Facing, MoveDir};

/// What a move attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Stepped through an open passage
    Moved,
    /// Burned the Phase powerup to pass through a wall
    Phased,
    /// Wall or boundary; only the facing changed
    Blocked,
}

/// Attempt one step. With an active Phase powerup a walled side is passed
/// through (bounds permitting) and the powerup is consumed; an open side is
/// walked normally and Phase is kept for a later wall.
pub fn apply_move(
    grid: &dyn GridProvider,
    pos: &mut IVec2,
    heading: &mut Facing,
    powerups: &mut PowerupState,
    dir: MoveDir,
) -> MoveOutcome {
    let side = dir.facing();
    *heading = side;

    let next = *pos + side.delta();

    if powerups.active_phase && grid.has_wall(*pos, side) {
        if !grid.in_bounds(next) {
            return MoveOutcome::Blocked;
        }
        *pos = next;
        powerups.active_phase = false;
        debug!("phased through wall to {}", next);
        return MoveOutcome::Phased;
    }

    if grid.has_wall(*pos, side) || !grid.in_bounds(next) {
        return MoveOutcome::Blocked;
    }
    // Both cells must agree the passage is open
    if grid.has_wall(next, side.opposite()) {
        return MoveOutcome::Blocked;
    }

    *pos = next;
    MoveOutcome::Moved
}
