//! Engine event surface: bus, types, and file logging
//!
//! The turn coordinator and executor communicate state changes to the
//! outside world exclusively through [`EventBus`]; the presentation layer
//! drains it, and [`EventLogger`] persists every drained event.

mod bus;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use logger::{EventLogConfig, EventLogger};
pub use types::{GameEvent, MatchEndReason};
