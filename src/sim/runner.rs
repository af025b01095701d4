//! Match execution engine
//!
//! Drives a headless app to completion: continuous mode chains turns on its
//! own, so the runner only seeds the first execute request and pumps
//! updates until the match is decided or the update cap trips.

use bevy::prelude::*;

use crate::actor::ActorId;
use crate::events::{EventBus, GameEvent, MatchEndReason};
use crate::maze::MazeLayout;
use crate::settings::MatchSettings;
use crate::turn::{TurnCoordinator, TurnRequests};

use super::HeadlessAppBuilder;

/// Parameters for an unattended match
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub width: i32,
    pub height: i32,
    pub seed: Option<u64>,
    pub layout: Option<MazeLayout>,
    pub settings: MatchSettings,
    pub script_a: Option<String>,
    pub script_b: Option<String>,
    /// Skip pacing delays and run the match as fast as updates allow
    pub fast: bool,
    pub file_logging: bool,
    pub console_logging: bool,
    /// Hard cap on engine updates, draws past it
    pub max_updates: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_MAZE_WIDTH,
            height: crate::constants::DEFAULT_MAZE_HEIGHT,
            seed: None,
            layout: None,
            settings: MatchSettings::default(),
            script_a: None,
            script_b: None,
            fast: false,
            file_logging: false,
            console_logging: false,
            max_updates: 100_000,
        }
    }
}

/// How an unattended match ended
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// None when the update cap tripped first
    pub outcome: Option<(ActorId, MatchEndReason)>,
    pub turns: u64,
    pub updates: u64,
}

/// Run one match to completion in continuous mode
pub fn run_match(config: RunConfig) -> MatchReport {
    let mut settings = config.settings.clone();
    if config.fast {
        settings.step_delay = 0.0;
        settings.continuous_turn_delay = 0.0;
    }

    let mut builder = HeadlessAppBuilder::new()
        .with_size(config.width, config.height)
        .with_settings(settings)
        .with_continuous();
    if let Some(seed) = config.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(layout) = config.layout {
        builder = builder.with_layout(layout);
    }
    if let (Some(a), Some(b)) = (&config.script_a, &config.script_b) {
        builder = builder.with_scripts(a, b);
    } else if let Some(a) = &config.script_a {
        builder = builder.with_scripts(a, crate::constants::DEFAULT_SCRIPT_B);
    } else if let Some(b) = &config.script_b {
        builder = builder.with_scripts(crate::constants::DEFAULT_SCRIPT_A, b);
    }
    if config.file_logging {
        builder = builder.with_file_logging();
    }
    if config.console_logging {
        builder = builder.with_console_logging();
    }

    let mut app = builder.build();
    app.world_mut().resource_mut::<TurnRequests>().execute = Some(ActorId::A);

    let mut updates = 0u64;
    while updates < config.max_updates {
        app.update();
        updates += 1;
        if app.world().resource::<TurnCoordinator>().is_over() {
            break;
        }
    }

    let world = app.world();
    let outcome = world
        .resource::<TurnCoordinator>()
        .outcome
        .map(|o| (o.winner, o.reason));
    let turns = world
        .resource::<EventBus>()
        .processed()
        .iter()
        .filter(|e| matches!(e.event, GameEvent::TurnStart { .. }))
        .count() as u64;

    if let Some((winner, reason)) = &outcome {
        info!("match over: {} wins ({:?}) after {} turns", winner, reason, turns);
    } else {
        warn!("match hit the update cap at {} updates", updates);
    }

    MatchReport {
        outcome,
        turns,
        updates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A walks straight into the exit while B idles
    const CORRIDOR: &str = "\
#######
#A   E#
#######";

    #[test]
    fn fast_match_runs_to_a_decision() {
        let config = RunConfig {
            layout: Some(MazeLayout::from_ascii(CORRIDOR)),
            script_a: Some("Repeat(4){MoveRight();}".to_string()),
            script_b: Some("Wait();".to_string()),
            fast: true,
            max_updates: 500,
            ..Default::default()
        };
        let report = run_match(config);
        let (winner, reason) = report.outcome.expect("match should have been decided");
        assert_eq!(winner, ActorId::A);
        assert_eq!(reason, MatchEndReason::ExitReached);
        assert!(report.updates < 500);
    }

    #[test]
    fn update_cap_produces_a_draw() {
        let config = RunConfig {
            layout: Some(MazeLayout::from_ascii(CORRIDOR)),
            script_a: Some("Wait();".to_string()),
            script_b: Some("Wait();".to_string()),
            fast: true,
            max_updates: 50,
            ..Default::default()
        };
        let report = run_match(config);
        assert!(report.outcome.is_none());
        assert_eq!(report.updates, 50);
        assert!(report.turns > 1);
    }
}
