//! Single-use powerups: collection, queued/active lifecycle, field placement
//!
//! A powerup picked up mid-turn is only queued; it becomes active at the
//! start of the collector's next turn and any unspent active powerup is
//! cleared when that turn's execution finishes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The two powerup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// One move may pass through an adjacent wall
    Phase,
    /// One radar query returns the opponent's live position
    TrueRadar,
}

impl std::fmt::Display for PowerupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerupKind::Phase => write!(f, "Phase"),
            PowerupKind::TrueRadar => write!(f, "TrueRadar"),
        }
    }
}

/// Per-combatant powerup flags
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PowerupState {
    pub queued_phase: bool,
    pub queued_true_radar: bool,
    pub active_phase: bool,
    pub active_true_radar: bool,
}

impl PowerupState {
    /// Queue a freshly collected powerup for the next turn
    pub fn collect(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Phase => self.queued_phase = true,
            PowerupKind::TrueRadar => self.queued_true_radar = true,
        }
    }

    /// Promote queued powerups to active at turn start; returns what was
    /// promoted so callers can emit notifications.
    pub fn promote_queued(&mut self) -> Vec<PowerupKind> {
        let mut promoted = Vec::new();
        if self.queued_phase {
            self.active_phase = true;
            self.queued_phase = false;
            promoted.push(PowerupKind::Phase);
        }
        if self.queued_true_radar {
            self.active_true_radar = true;
            self.queued_true_radar = false;
            promoted.push(PowerupKind::TrueRadar);
        }
        promoted
    }

    /// Drop unspent active powerups at the end of an executed turn
    pub fn clear_active(&mut self) {
        self.active_phase = false;
        self.active_true_radar = false;
    }
}

/// Powerups still lying on the maze floor
#[derive(Resource, Debug, Clone, Default)]
pub struct PowerupField {
    items: Vec<(IVec2, PowerupKind)>,
}

impl PowerupField {
    pub fn new(items: Vec<(IVec2, PowerupKind)>) -> Self {
        Self { items }
    }

    /// Remove and return the powerup at `cell`, if any
    pub fn take_at(&mut self, cell: IVec2) -> Option<PowerupKind> {
        let idx = self.items.iter().position(|(pos, _)| *pos == cell)?;
        Some(self.items.swap_remove(idx).1)
    }

    pub fn remaining(&self) -> &[(IVec2, PowerupKind)] {
        &self.items
    }
}
