//! Tunable defaults shared across the engine

/// Seconds between two consecutive script actions
pub const DEFAULT_STEP_DELAY: f32 = 0.25;

/// Pause between turns when continuous mode chains executions
pub const DEFAULT_CONTINUOUS_TURN_DELAY: f32 = 0.15;

/// Seconds a combatant may spend editing before the turn is forfeited
pub const DEFAULT_EDIT_TIME_LIMIT: f32 = 30.0;

/// Damage dealt by a radar-guided shot that lands
pub const DEFAULT_SHOT_DAMAGE: i32 = 20;

/// Starting health per combatant
pub const DEFAULT_MAX_HEALTH: i32 = 100;

/// Default scripts pre-filled into the two editors
pub const DEFAULT_SCRIPT_A: &str = "MoveRight();MoveUp();MoveUp();";
pub const DEFAULT_SCRIPT_B: &str = "MoveLeft();MoveDown();";

/// Default maze dimensions for generated matches
pub const DEFAULT_MAZE_WIDTH: i32 = 8;
pub const DEFAULT_MAZE_HEIGHT: i32 = 8;

/// Smallest maze the generator will produce
pub const MIN_MAZE_SIZE: i32 = 3;

/// Powerups of each kind scattered per generated maze
pub const POWERUPS_PER_KIND: usize = 2;
