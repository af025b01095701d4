//! Headless simulation: app assembly and unattended match runs

mod app_builder;
mod runner;

pub use app_builder::{drain_events, HeadlessAppBuilder};
pub use runner::{run_match, MatchReport, RunConfig};
