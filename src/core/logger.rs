//! Main logger implementation

use super::{
    device::LogDevice,
    error::Result,
    fallback::{FallbackReporter, WriteFailureCallback},
    field::FieldValue,
    log_context::{ContextGuard, LogContext, LoggerContext},
    log_entry::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::{FormatterConfig, LineFormatter, OutputFormat, StandardFormatter},
    payload::{Message, Payload},
};
use crate::devices::{Destination, LocklessLogDevice};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity-filtered front end over a single [`LogDevice`].
///
/// `emit` formats one line per event and hands it to the device on the
/// calling thread. Nothing is queued and nothing is locked around the
/// write, so a `Logger` shared between threads gives no ordering or
/// atomicity guarantee across them.
pub struct Logger {
    min_level: AtomicU8,
    device: Option<Box<dyn LogDevice>>,
    formatter: Box<dyn LineFormatter>,
    context: LoggerContext,
    program_name: Option<String>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger writing to `destination` at the default `Info` level.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lockless_logger::{Destination, Logger};
    ///
    /// let file_logger = Logger::new("/var/log/app.log")?;
    /// let console_logger = Logger::new(Destination::stderr())?;
    /// let null_logger = Logger::new(Destination::None)?;
    /// # Ok::<(), lockless_logger::LoggerError>(())
    /// ```
    pub fn new(destination: impl Into<Destination>) -> Result<Self> {
        Logger::builder().destination(destination).build()
    }

    /// A logger without a device; every emit is a no-op
    #[must_use]
    pub fn null() -> Self {
        Self::from_parts(None, Box::new(StandardFormatter::default()))
    }

    /// Wrap a custom device
    #[must_use]
    pub fn with_device(device: impl LogDevice + 'static) -> Self {
        Self::from_parts(Some(Box::new(device)), Box::new(StandardFormatter::default()))
    }

    fn from_parts(device: Option<Box<dyn LogDevice>>, formatter: Box<dyn LineFormatter>) -> Self {
        Self {
            min_level: AtomicU8::new(LogLevel::default() as u8),
            device,
            formatter,
            context: LoggerContext::new(),
            program_name: None,
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    /// Whether an event at `level` would be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.device.is_some() && level >= self.level()
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.level() <= LogLevel::Trace
    }

    pub fn has_device(&self) -> bool {
        self.device.is_some()
    }

    /// Emit one event.
    ///
    /// Error values go under `err`, anything else under `msg`. `extra` is
    /// copied beneath the message, so its own `msg`/`err` keys are
    /// superseded. Returns `true` in every case, including when the event
    /// is filtered or the device fails to write.
    ///
    /// # Example
    ///
    /// ```
    /// use lockless_logger::{LogContext, LogLevel, Logger};
    ///
    /// let logger = Logger::null();
    /// let extra = LogContext::new().with_field("req_id", 42);
    /// assert!(logger.emit(LogLevel::Warn, "disk low", Some("worker"), Some(&extra)));
    /// ```
    pub fn emit(
        &self,
        level: LogLevel,
        message: impl Into<Message>,
        program_name: Option<&str>,
        extra: Option<&LogContext>,
    ) -> bool {
        let Some(device) = self.enabled_device(level) else {
            return true;
        };

        let base = self.base_fields();
        let payload = Payload::build(message.into(), base.as_ref(), extra);
        self.dispatch(device, level, program_name, payload);
        true
    }

    /// Like [`emit`](Self::emit), but builds the message and extra data
    /// only if the event passes the threshold.
    pub fn emit_with<F>(&self, level: LogLevel, program_name: Option<&str>, build: F) -> bool
    where
        F: FnOnce() -> (Message, LogContext),
    {
        let Some(device) = self.enabled_device(level) else {
            return true;
        };

        let (message, extra) = build();
        let base = self.base_fields();
        let payload = Payload::build(message, base.as_ref(), Some(&extra));
        self.dispatch(device, level, program_name, payload);
        true
    }

    fn enabled_device(&self, level: LogLevel) -> Option<&dyn LogDevice> {
        let device = self.device.as_deref()?;
        if level < self.level() {
            self.metrics.record_filtered();
            return None;
        }
        Some(device)
    }

    fn base_fields(&self) -> Option<std::collections::BTreeMap<String, FieldValue>> {
        if self.context.is_empty() {
            None
        } else {
            Some(self.context.get_fields())
        }
    }

    fn dispatch(
        &self,
        device: &dyn LogDevice,
        level: LogLevel,
        program_name: Option<&str>,
        payload: Payload,
    ) {
        let mut event = LogEvent::new(level, payload);
        if let Some(name) = program_name.or(self.program_name.as_deref()) {
            event = event.with_program_name(name);
        }

        let line = single_line(self.formatter.format_line(&event));

        if device.write(&line) {
            self.metrics.record_written();
        } else {
            self.metrics.record_failed();
        }
    }

    #[inline]
    pub fn log(&self, level: LogLevel, message: impl Into<Message>) -> bool {
        self.emit(level, message, None, None)
    }

    #[inline]
    pub fn trace(&self, message: impl Into<Message>) -> bool {
        self.log(LogLevel::Trace, message)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<Message>) -> bool {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<Message>) -> bool {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<Message>) -> bool {
        self.log(LogLevel::Warn, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<Message>) -> bool {
        self.log(LogLevel::Error, message)
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<Message>) -> bool {
        self.log(LogLevel::Fatal, message)
    }

    /// Persistent fields merged into every event
    pub fn context(&self) -> &LoggerContext {
        &self.context
    }

    /// Add a persistent field for as long as the returned guard lives
    pub fn with_context<K, V>(&self, key: K, value: V) -> ContextGuard
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.scoped(key, value)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Close and detach the device; later emits become no-ops.
    ///
    /// Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.close();
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use lockless_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .destination(Destination::stderr())
    ///     .output_format(OutputFormat::Logfmt)
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.is_enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

/// Terminate `line` with exactly one newline, escaping any line break a
/// custom formatter left inside it.
fn single_line(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
    }
    if line.contains(['\n', '\r']) {
        line = line.replace('\n', "\\n").replace('\r', "\\r");
    }
    line.push('\n');
    line
}

impl Default for Logger {
    fn default() -> Self {
        Self::null()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("device", &self.device.as_ref().map(|d| d.name()))
            .field("program_name", &self.program_name)
            .finish()
    }
}

enum Target {
    Destination(Destination),
    Device(Box<dyn LogDevice>),
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use lockless_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Warn)
///     .destination(Destination::stdout())
///     .program_name("billing")
///     .context_field("service", "billing-api")
///     .on_write_failure(Arc::new(|err| {
///         eprintln!("ALERT: {}", err);
///     }))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    target: Target,
    formatter: Option<Box<dyn LineFormatter>>,
    output_format: OutputFormat,
    formatter_config: FormatterConfig,
    program_name: Option<String>,
    fallback: FallbackReporter,
    context: LogContext,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::default(),
            target: Target::Destination(Destination::None),
            formatter: None,
            output_format: OutputFormat::default(),
            formatter_config: FormatterConfig::default(),
            program_name: None,
            fallback: FallbackReporter::default(),
            context: LogContext::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Write through a [`LocklessLogDevice`] opened on `destination`
    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: impl Into<Destination>) -> Self {
        self.target = Target::Destination(destination.into());
        self
    }

    /// Write through a custom device instead of a destination
    #[must_use = "builder methods return a new value"]
    pub fn device<D: LogDevice + 'static>(mut self, device: D) -> Self {
        self.target = Target::Device(Box::new(device));
        self
    }

    /// Replace the built-in layouts with a custom formatter
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: LineFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter_config(mut self, config: FormatterConfig) -> Self {
        self.formatter_config = config;
        self
    }

    /// Program name used when `emit` is given none
    #[must_use = "builder methods return a new value"]
    pub fn program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    /// Called with every write failure the logger swallows.
    ///
    /// Applies to devices opened from a destination; custom devices report
    /// their own failures.
    #[must_use = "builder methods return a new value"]
    pub fn on_write_failure(mut self, callback: WriteFailureCallback) -> Self {
        self.fallback = self.fallback.with_callback(callback);
        self
    }

    /// Do not print write failures to stderr
    #[must_use = "builder methods return a new value"]
    pub fn silent_failures(mut self) -> Self {
        self.fallback = self.fallback.silent();
        self
    }

    /// Persistent field added to every event
    #[must_use = "builder methods return a new value"]
    pub fn context_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.add_field(key, value);
        self
    }

    /// Build the Logger, opening its destination
    pub fn build(self) -> Result<Logger> {
        let device: Option<Box<dyn LogDevice>> = match self.target {
            Target::Device(device) => Some(device),
            Target::Destination(Destination::None) => None,
            Target::Destination(destination) => Some(Box::new(
                LocklessLogDevice::open(destination)?.with_fallback(self.fallback),
            )),
        };

        let formatter = self.formatter.unwrap_or_else(|| {
            Box::new(StandardFormatter::new(self.output_format).with_config(self.formatter_config))
        });

        let mut logger = Logger::from_parts(device, formatter);
        logger.set_level(self.level);
        logger.program_name = self.program_name;
        for (key, value) in self.context.fields() {
            logger.context.set(key.clone(), value.clone());
        }

        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
