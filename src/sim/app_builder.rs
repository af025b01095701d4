//! Headless app builder
//!
//! Assembles a complete engine app with minimal plugins: maze, combatants,
//! turn coordinator, executor, and the event bus drain. Used by the match
//! runner and by tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::actor::{Actor, ActorId, CellPos, Facing, Heading, Health};
use crate::events::{update_event_bus_time, EventBus, EventLogConfig, EventLogger, GameEvent};
use crate::exec::{advance_active_run, ActiveRun};
use crate::maze::{generate, Maze, MazeLayout};
use crate::powerup::{PowerupField, PowerupState};
use crate::radar::{RadarFix, RadarHistory};
use crate::settings::{MatchSettings, ScriptTexts};
use crate::turn::{
    begin_turn, handle_turn_requests, tick_inter_turn, tick_turn_timer, TurnCoordinator,
    TurnRequests,
};

/// Builder for headless engine apps
pub struct HeadlessAppBuilder {
    width: i32,
    height: i32,
    seed: Option<u64>,
    layout: Option<MazeLayout>,
    settings: MatchSettings,
    scripts: ScriptTexts,
    continuous: bool,
    fps: f32,
    file_logging: bool,
    console_logging: bool,
}

impl HeadlessAppBuilder {
    pub fn new() -> Self {
        Self {
            width: crate::constants::DEFAULT_MAZE_WIDTH,
            height: crate::constants::DEFAULT_MAZE_HEIGHT,
            seed: None,
            layout: None,
            settings: MatchSettings::default(),
            scripts: ScriptTexts::default(),
            continuous: false,
            fps: 60.0,
            file_logging: false,
            console_logging: false,
        }
    }

    /// Set the generated maze dimensions
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fix the maze generator seed for reproducible matches
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use an explicit layout instead of generating one
    pub fn with_layout(mut self, layout: MazeLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_settings(mut self, settings: MatchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set both combatants' starting scripts
    pub fn with_scripts(mut self, a: &str, b: &str) -> Self {
        self.scripts.set(ActorId::A, a);
        self.scripts.set(ActorId::B, b);
        self
    }

    /// Start the match in continuous mode
    pub fn with_continuous(mut self) -> Self {
        self.continuous = true;
        self
    }

    /// Set the target update rate (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Write the event stream to a session log file
    pub fn with_file_logging(mut self) -> Self {
        self.file_logging = true;
        self
    }

    /// Install the tracing subscriber for console output
    ///
    /// Off by default: installing it twice in one process panics, so test
    /// apps leave it alone.
    pub fn with_console_logging(mut self) -> Self {
        self.console_logging = true;
        self
    }

    /// Build the app with minimal plugins and all engine resources
    ///
    /// The first turn belongs to combatant A; the caller drives the match
    /// by filling `TurnRequests` and calling `app.update()`.
    pub fn build(self) -> App {
        let layout = self
            .layout
            .unwrap_or_else(|| generate(self.width, self.height, self.seed));

        let mut app = App::new();
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f32(1.0 / self.fps),
        )));
        if self.console_logging {
            app.add_plugins(bevy::log::LogPlugin::default());
        }

        let mut coord = TurnCoordinator::new(self.settings.edit_time_limit);
        coord.continuous = self.continuous;

        let mut bus = EventBus::new();
        bus.emit(GameEvent::MatchStart {
            width: layout.grid.width(),
            height: layout.grid.height(),
            spawn_a: (layout.spawn_a.x, layout.spawn_a.y),
            spawn_b: (layout.spawn_b.x, layout.spawn_b.y),
            exit: (layout.exit.x, layout.exit.y),
        });

        let mut logger = None;
        if self.file_logging {
            let mut l = EventLogger::new(EventLogConfig::default());
            l.start_session();
            logger = Some(l);
        }

        app.insert_resource(RadarHistory::new(
            RadarFix::new(layout.spawn_a, Facing::default()),
            RadarFix::new(layout.spawn_b, Facing::default()),
        ));
        app.insert_resource(PowerupField::new(layout.powerups.clone()));
        app.insert_resource(self.settings.clone());
        app.insert_resource(self.scripts);
        app.insert_resource(coord);
        app.init_resource::<ActiveRun>();
        app.init_resource::<TurnRequests>();

        let world = app.world_mut();
        world.spawn((
            Actor(ActorId::A),
            CellPos(layout.spawn_a),
            Heading::default(),
            Health::new(self.settings.max_health),
            PowerupState::default(),
        ));
        world.spawn((
            Actor(ActorId::B),
            CellPos(layout.spawn_b),
            Heading::default(),
            Health::new(self.settings.max_health),
            PowerupState::default(),
        ));

        app.insert_resource(Maze(Box::new(layout.grid)));

        // first turn: queued powerups are empty, but announce the turn
        let mut empty = PowerupState::default();
        begin_turn(ActorId::A, &mut empty, &mut bus);
        app.insert_resource(bus);
        if let Some(logger) = logger {
            app.insert_resource(logger);
        }

        app.add_systems(
            Update,
            (
                update_event_bus_time,
                tick_inter_turn,
                handle_turn_requests,
                tick_turn_timer,
                advance_active_run,
                drain_events,
            )
                .chain(),
        );

        app
    }
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain the bus each frame: trace each event and append it to the session
/// log when one is open.
pub fn drain_events(mut bus: ResMut<EventBus>, logger: Option<ResMut<EventLogger>>) {
    let events = bus.drain();
    if events.is_empty() {
        return;
    }
    let mut logger = logger;
    for entry in &events {
        info!("[{}] {:?}", entry.event.type_code(), entry.event);
        if let Some(ref mut logger) = logger {
            logger.log(entry.time_ms, &entry.event);
        }
    }
}
