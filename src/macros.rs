//! Logging macros for ergonomic log message formatting.
//!
//! The message is formatted only after the level check passes, so
//! arguments of filtered events are never rendered. Filtered events are
//! counted the same way as with the `Logger` methods.
//!
//! # Examples
//!
//! ```
//! use lockless_logger::prelude::*;
//! use lockless_logger::info;
//!
//! let logger = Logger::null();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a formatted message at `level`. Evaluates to the `emit` result.
///
/// # Examples
///
/// ```
/// # use lockless_logger::prelude::*;
/// # let logger = Logger::null();
/// use lockless_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit_with($level, None, || {
            ($crate::Message::from(format!($($arg)+)), $crate::LogContext::new())
        })
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use lockless_logger::prelude::*;
/// # let logger = Logger::null();
/// use lockless_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogDevice, LogLevel, Logger};
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingDevice(Arc<AtomicUsize>);

    impl LogDevice for CountingDevice {
        fn write(&self, _line: &str) -> bool {
            self.0.fetch_add(1, Ordering::Relaxed);
            true
        }

        fn close(&mut self) {}

        fn name(&self) -> &str {
            "counting"
        }
    }

    /// Counts how often it gets rendered
    struct Probe<'a>(&'a AtomicUsize);

    impl fmt::Display for Probe<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fetch_add(1, Ordering::Relaxed);
            f.write_str("probe")
        }
    }

    #[test]
    fn test_level_macros_write_when_enabled() {
        let writes = Arc::new(AtomicUsize::new(0));
        let logger = Logger::with_device(CountingDevice(Arc::clone(&writes)));
        logger.set_level(LogLevel::Trace);

        assert!(trace!(logger, "Value: {}", 10));
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");

        assert_eq!(writes.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn test_filtered_macro_skips_formatting() {
        let writes = Arc::new(AtomicUsize::new(0));
        let logger = Logger::with_device(CountingDevice(Arc::clone(&writes)));
        let renders = AtomicUsize::new(0);

        assert!(debug!(logger, "{}", Probe(&renders)));
        assert_eq!(renders.load(Ordering::Relaxed), 0);
        assert_eq!(logger.metrics().filtered_count(), 1);

        info!(logger, "{}", Probe(&renders));
        assert_eq!(renders.load(Ordering::Relaxed), 1);
        assert_eq!(writes.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_filtered_macro_counts_like_method() {
        let logger = Logger::with_device(CountingDevice(Arc::new(AtomicUsize::new(0))));
        logger.set_level(LogLevel::Error);

        debug!(logger, "macro {}", 1);
        logger.debug("method");

        assert_eq!(logger.metrics().filtered_count(), 2);
        assert_eq!(logger.metrics().written_count(), 0);
    }

    #[test]
    fn test_macros_on_null_logger() {
        let logger = Logger::null();
        assert!(log!(logger, LogLevel::Info, "Formatted: {}", 42));
    }
}
