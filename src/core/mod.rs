//! Core logger types and traits

pub mod device;
pub mod error;
pub mod fallback;
pub mod field;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod payload;
pub mod timestamp;

pub use device::LogDevice;
pub use error::{LoggerError, Result};
pub use fallback::{FallbackReporter, WriteFailureCallback};
pub use field::FieldValue;
pub use log_context::{ContextGuard, LogContext, LoggerContext};
pub use log_entry::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::{sanitize, FormatterConfig, LineFormatter, OutputFormat, StandardFormatter};
pub use payload::{ErrorValue, Message, Payload, ERR_KEY, MSG_KEY};
pub use timestamp::{banner_timestamp, TimestampFormat};
