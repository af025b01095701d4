//! Combatant components and movement rules

mod components;
mod movement;

pub use components::{Actor, ActorId, CellPos, Facing, Heading, Health, MoveDir};
pub use movement::{MoveOutcome, apply_move};
