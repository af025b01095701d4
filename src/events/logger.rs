//! File logger for match events
//!
//! One `.mdlog` file per session under the log directory, one line per
//! event: `<time_ms> <code> <json payload>`.

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::types::GameEvent;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    pub log_dir: PathBuf,
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource, Default)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            config,
        }
    }

    /// Open a fresh log file with a new session UUID and write the
    /// SessionStart line.
    pub fn start_session(&mut self) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Local::now();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("failed to create log directory: {}", e);
            return;
        }

        let filename = format!(
            "{}_{}.mdlog",
            timestamp.format("%Y%m%d_%H%M%S"),
            &self.session_id[..8]
        );
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!(
                    "event logging started: {} (session: {})",
                    path.display(),
                    &self.session_id[..8]
                );
                self.log(
                    0,
                    &GameEvent::SessionStart {
                        session_id: self.session_id.clone(),
                        timestamp: timestamp.to_rfc3339(),
                    },
                );
            }
            Err(e) => {
                warn!("failed to open event log: {}", e);
            }
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Flush and close the current session file
    pub fn end_session(&mut self) {
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("failed to flush event log: {}", e);
        }
    }

    pub fn log(&mut self, time_ms: u32, event: &GameEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };

        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(writer, "{} {} {}", time_ms, event.type_code(), payload) {
            warn!("failed to write event: {}", e);
        }
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        self.end_session();
    }
}
