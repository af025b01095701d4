//! Combatant components and core orientation types

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Combatant identifier (A or B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorId {
    A,
    B,
}

impl ActorId {
    /// The other combatant
    pub fn opponent(self) -> Self {
        match self {
            ActorId::A => ActorId::B,
            ActorId::B => ActorId::A,
        }
    }

    /// Stable index for per-actor storage
    pub fn index(self) -> usize {
        match self {
            ActorId::A => 0,
            ActorId::B => 1,
        }
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorId::A => write!(f, "A"),
            ActorId::B => write!(f, "B"),
        }
    }
}

/// Cardinal orientation on the grid. North is +y, East is +x.
///
/// Determines "forward" for relative shot modifiers and which wall a move
/// runs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    South,
    East,
    West,
}

impl Facing {
    /// One-cell translation in this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Facing::North => IVec2::new(0, 1),
            Facing::South => IVec2::new(0, -1),
            Facing::East => IVec2::new(1, 0),
            Facing::West => IVec2::new(-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::East => Facing::West,
            Facing::West => Facing::East,
        }
    }

    /// 90 degrees counterclockwise
    pub fn turned_left(self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    /// 90 degrees clockwise
    pub fn turned_right(self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Facing::North => "North",
            Facing::South => "South",
            Facing::East => "East",
            Facing::West => "West",
        };
        write!(f, "{}", s)
    }
}

/// Absolute move directions as written in scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    /// The facing a combatant adopts when stepping this way
    pub fn facing(self) -> Facing {
        match self {
            MoveDir::Up => Facing::North,
            MoveDir::Down => Facing::South,
            MoveDir::Left => Facing::West,
            MoveDir::Right => Facing::East,
        }
    }
}

/// Marker tying an entity to one combatant
#[derive(Component, Debug, Clone, Copy)]
pub struct Actor(pub ActorId);

/// Grid cell the combatant occupies
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos(pub IVec2);

/// Current orientation
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Heading(pub Facing);

/// Combatant health, clamped at zero
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage and return the remaining health
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.current = (self.current - amount).clamp(0, self.max);
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_rotations_are_cyclic() {
        let mut f = Facing::North;
        for _ in 0..4 {
            f = f.turned_right();
        }
        assert_eq!(f, Facing::North);

        assert_eq!(Facing::North.turned_right(), Facing::East);
        assert_eq!(Facing::North.turned_left(), Facing::West);
        assert_eq!(Facing::East.turned_left(), Facing::North);
    }

    #[test]
    fn facing_deltas_match_grid_axes() {
        assert_eq!(Facing::North.delta(), IVec2::new(0, 1));
        assert_eq!(Facing::South.delta(), IVec2::new(0, -1));
        assert_eq!(Facing::East.delta(), IVec2::new(1, 0));
        assert_eq!(Facing::West.delta(), IVec2::new(-1, 0));
    }

    #[test]
    fn health_clamps_at_zero() {
        let mut h = Health::new(100);
        assert_eq!(h.take_damage(30), 70);
        assert_eq!(h.take_damage(200), 0);
        assert!(h.is_dead());
    }

    #[test]
    fn opponent_flips() {
        assert_eq!(ActorId::A.opponent(), ActorId::B);
        assert_eq!(ActorId::B.opponent(), ActorId::A);
    }
}
