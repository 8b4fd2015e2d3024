//! Log event structure

use super::log_level::LogLevel;
use super::payload::Payload;
use chrono::{DateTime, Utc};

/// One event on its way from `Logger::emit` to the formatter.
///
/// Events are ephemeral: they are built, formatted and dropped within a
/// single `emit` call.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub program_name: Option<String>,
    pub payload: Payload,
}

impl LogEvent {
    pub fn new(level: LogLevel, payload: Payload) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            program_name: None,
            payload,
        }
    }

    #[must_use]
    pub fn with_program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Canonical severity label
    pub fn label(&self) -> &'static str {
        self.level.to_str()
    }
}
