//! # Lockless Logger
//!
//! A structured logging facade that turns each event into one line of text
//! and appends it to a file or an already-open stream.
//!
//! ## Features
//!
//! - **Structured payloads**: every line carries `msg` or `err` plus extra key/value fields
//! - **Pluggable layouts**: text, JSON and logfmt, or any `Fn(&LogEvent) -> String`
//! - **Lockless appends**: no mutex around the write path, no buffering, no rotation
//! - **Never fails the caller**: write errors are reported out of band
//!
//! ```no_run
//! use lockless_logger::prelude::*;
//!
//! let logger = Logger::new("/var/log/app.log")?;
//! let extra = LogContext::new().with_field("req_id", 42);
//! logger.emit(LogLevel::Warn, "disk low", Some("worker"), Some(&extra));
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod devices;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        ContextGuard, ErrorValue, FieldValue, FormatterConfig, LineFormatter, LogContext,
        LogDevice, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerContext, LoggerError,
        LoggerMetrics, Message, OutputFormat, Payload, Result, StandardFormatter,
        TimestampFormat,
    };
    pub use crate::devices::{Destination, LocklessLogDevice, Sink};
}

pub use crate::core::{
    ContextGuard, ErrorValue, FallbackReporter, FieldValue, FormatterConfig, LineFormatter,
    LogContext, LogDevice, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerContext, LoggerError,
    LoggerMetrics, Message, OutputFormat, Payload, Result, StandardFormatter, TimestampFormat,
    WriteFailureCallback,
};
pub use devices::{Destination, LocklessLogDevice, Sink};
