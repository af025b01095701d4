//! Event bus - the core's outward notification surface
//!
//! Engine systems emit state changes to the bus; the presentation layer
//! (and the file logger) drain it once per frame. Keeping the surface a
//! plain resource means the turn coordinator and executor never hold a
//! reference to whatever is listening.

use bevy::prelude::*;

use super::types::GameEvent;

/// Timestamped event waiting on the bus
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Milliseconds since match start
    pub time_ms: u32,
    pub event: GameEvent,
}

/// Central event bus between the engine core and its consumers
#[derive(Resource, Default)]
pub struct EventBus {
    /// Emitted this frame, waiting to be consumed
    pending: Vec<BusEvent>,
    /// Already consumed (kept for the logger and for assertions)
    processed: Vec<BusEvent>,
    /// Elapsed match time for timestamping
    elapsed_ms: u32,
    /// Disabled buses drop everything (bare simulation runs)
    enabled: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Pending events without draining them
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.clone());
        events
    }

    pub fn processed(&self) -> &[BusEvent] {
        &self.processed
    }

    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

/// System keeping the bus clock in step with match time
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}
