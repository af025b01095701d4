//! Event type definitions for the notification and logging system

use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, Facing};
use crate::powerup::PowerupKind;

/// Why a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEndReason {
    /// A combatant's health reached zero
    HealthDepleted,
    /// A combatant stepped onto the exit cell
    ExitReached,
}

/// All engine events consumed by the presentation layer and the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session events ===
    /// Log session opened (once per process run)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
    },

    // === Match events ===
    MatchStart {
        width: i32,
        height: i32,
        spawn_a: (i32, i32),
        spawn_b: (i32, i32),
        exit: (i32, i32),
    },
    MatchEnd {
        winner: ActorId,
        loser: ActorId,
        reason: MatchEndReason,
    },

    // === Turn events ===
    /// A combatant's turn began (also the continuous-mode hook)
    TurnStart { actor: ActorId },
    /// The edit timer expired; the turn passed with zero actions
    TurnTimeout { actor: ActorId },
    /// The active combatant grabbed edit focus
    EditBegan { actor: ActorId },
    /// Script parsed and handed to the executor
    ExecuteStart { actor: ActorId, steps: usize },

    // === Action events ===
    /// Position or facing changed; carries the *pre*-invocation values
    PositionMoved {
        actor: ActorId,
        from: (i32, i32),
        from_facing: Facing,
    },
    ShotFired {
        shooter: ActorId,
        target: (i32, i32),
        hit: bool,
    },
    DamageTaken {
        actor: ActorId,
        amount: i32,
        remaining: i32,
    },

    // === Powerup events ===
    PowerupCollected { actor: ActorId, kind: PowerupKind },
    /// Queued powerup promoted to active at turn start
    PowerupActivated { actor: ActorId, kind: PowerupKind },
}

impl GameEvent {
    /// Event type code for compact log lines
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::MatchStart { .. } => "MS",
            GameEvent::MatchEnd { .. } => "ME",
            GameEvent::TurnStart { .. } => "TS",
            GameEvent::TurnTimeout { .. } => "TT",
            GameEvent::EditBegan { .. } => "EB",
            GameEvent::ExecuteStart { .. } => "EX",
            GameEvent::PositionMoved { .. } => "PM",
            GameEvent::ShotFired { .. } => "SF",
            GameEvent::DamageTaken { .. } => "DT",
            GameEvent::PowerupCollected { .. } => "PC",
            GameEvent::PowerupActivated { .. } => "PA",
        }
    }
}
