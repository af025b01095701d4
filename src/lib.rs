//! Mazeduel - a turn-based maze duel engine built with Bevy
//!
//! Two combatants take turns running short command scripts through a
//! walled maze, trading shots guided by a deliberately stale radar. This
//! crate provides the script language, the turn engine, and a headless
//! simulation harness.

// Core modules
pub mod constants;
pub mod events;
pub mod settings;
pub mod sim;

// Engine modules
pub mod actor;
pub mod exec;
pub mod maze;
pub mod powerup;
pub mod radar;
pub mod script;
pub mod turn;

// Re-export commonly used types for convenience
pub use actor::{
    apply_move, Actor, ActorId, CellPos, Facing, Heading, Health, MoveDir, MoveOutcome,
};
pub use constants::*;
pub use events::{
    update_event_bus_time, BusEvent, EventBus, EventLogConfig, EventLogger, GameEvent,
    MatchEndReason,
};
pub use exec::{advance_active_run, ActiveRun, ScriptRun};
pub use maze::{generate, AsciiMarkers, GridMap, GridProvider, Maze, MazeLayout};
pub use powerup::{PowerupField, PowerupKind, PowerupState};
pub use radar::{RadarFix, RadarHistory};
pub use script::{
    parse_script, parse_sequence, resolve, resolve_shot_target, tokenize, Command, ShotModifier,
    Token,
};
pub use settings::{MatchSettings, ScriptTexts};
pub use sim::{drain_events, run_match, HeadlessAppBuilder, MatchReport, RunConfig};
pub use turn::{
    begin_turn, handle_turn_requests, tick_inter_turn, tick_turn_timer, MatchOutcome,
    TurnCoordinator, TurnPhase, TurnRequests,
};
