//! Line formatting for log events
//!
//! A [`LineFormatter`] turns one [`LogEvent`] into one newline-terminated
//! line. [`StandardFormatter`] provides the built-in layouts:
//! - Text: Human-readable format (default)
//! - Json: Machine-readable JSON format
//! - Logfmt: Key-value format compatible with log aggregation tools
//!
//! Every built-in layout escapes embedded newlines, carriage returns and
//! tabs, so one event can never span two lines.

use super::field::FieldValue;
use super::log_entry::LogEvent;
use super::payload::{ErrorValue, Message, ERR_KEY, MSG_KEY};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Strategy turning an event into one line of text.
///
/// Implementations must be total and deterministic for a given event, and
/// should return a single line. The logger appends the trailing newline if
/// it is missing and escapes any other `\n` or `\r` in the result.
///
/// Any `Fn(&LogEvent) -> String` closure is a formatter:
///
/// ```
/// use lockless_logger::{LineFormatter, LogEvent};
///
/// let formatter = |event: &LogEvent| format!("{} {}\n", event.label(), event.payload.message());
/// # fn takes(_: impl LineFormatter) {}
/// # takes(formatter);
/// ```
pub trait LineFormatter: Send + Sync {
    fn format_line(&self, event: &LogEvent) -> String;
}

impl<F> LineFormatter for F
where
    F: Fn(&LogEvent) -> String + Send + Sync,
{
    fn format_line(&self, event: &LogEvent) -> String {
        self(event)
    }
}

/// Output layout for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [WARN ] worker: disk low req_id=42`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"WARN","msg":"disk low","req_id":42,"timestamp":"2025-01-08T10:30:45.123Z"}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=WARN msg="disk low" req_id=42`
    Logfmt,
}

/// Options shared by the built-in layouts
///
/// # Examples
///
/// ```
/// use lockless_logger::core::{FormatterConfig, TimestampFormat};
///
/// let config = FormatterConfig::new()
///     .with_timestamp_format(TimestampFormat::Iso8601Micros)
///     .with_level_uppercase(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    pub timestamp_format: TimestampFormat,
    /// Whether to display the level in uppercase (ERROR vs error)
    pub level_uppercase: bool,
    /// Whether to render the event's program name when present
    pub include_program_name: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            level_uppercase: true,
            include_program_name: true,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_level_uppercase(mut self, uppercase: bool) -> Self {
        self.level_uppercase = uppercase;
        self
    }

    #[must_use]
    pub fn with_include_program_name(mut self, include: bool) -> Self {
        self.include_program_name = include;
        self
    }
}

/// The built-in formatter: an [`OutputFormat`] plus its options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardFormatter {
    output_format: OutputFormat,
    config: FormatterConfig,
}

impl StandardFormatter {
    pub fn new(output_format: OutputFormat) -> Self {
        Self {
            output_format,
            config: FormatterConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FormatterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn level_label(&self, event: &LogEvent) -> Cow<'static, str> {
        if self.config.level_uppercase {
            Cow::Borrowed(event.label())
        } else {
            Cow::Owned(event.label().to_lowercase())
        }
    }

    fn program_name<'a>(&self, event: &'a LogEvent) -> Option<&'a str> {
        if self.config.include_program_name {
            event.program_name.as_deref()
        } else {
            None
        }
    }

    /// Format as human-readable text
    fn format_text(&self, event: &LogEvent) -> String {
        let timestamp = self.config.timestamp_format.format(&event.timestamp);
        let mut line = format!("[{}] [{:5}] ", sanitize(&timestamp), self.level_label(event));

        if let Some(program_name) = self.program_name(event) {
            line.push_str(&sanitize(program_name));
            line.push_str(": ");
        }

        line.push_str(&sanitize(&event.payload.message().to_string()));

        for (key, value) in event.payload.fields() {
            line.push(' ');
            line.push_str(&sanitize(key));
            line.push('=');
            line.push_str(&sanitize(&value.to_string()));
        }

        line
    }

    /// Format as JSON
    ///
    /// Line metadata (`timestamp`, `level`, `progname`) wins over extra
    /// fields of the same name.
    fn format_json(&self, event: &LogEvent) -> String {
        let mut json_obj = serde_json::Map::new();

        for (key, value) in event.payload.fields() {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        match event.payload.message() {
            Message::Value(value) => {
                json_obj.insert(MSG_KEY.to_string(), value.to_json_value());
            }
            Message::Error(err) => {
                json_obj.insert(ERR_KEY.to_string(), error_to_json(err));
            }
        }

        json_obj.insert("timestamp".to_string(), self.timestamp_json(event));
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(self.level_label(event).into_owned()),
        );
        if let Some(program_name) = self.program_name(event) {
            json_obj.insert(
                "progname".to_string(),
                serde_json::Value::String(program_name.to_string()),
            );
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }

    fn timestamp_json(&self, event: &LogEvent) -> serde_json::Value {
        match self.config.timestamp_format {
            TimestampFormat::Unix => serde_json::Value::Number(event.timestamp.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(event.timestamp.timestamp_millis().into())
            }
            ref other => serde_json::Value::String(other.format(&event.timestamp)),
        }
    }

    /// Format as logfmt (key=value pairs)
    fn format_logfmt(&self, event: &LogEvent) -> String {
        let mut parts = Vec::with_capacity(event.payload.len() + 3);

        parts.push(format!(
            "timestamp={}",
            escape_logfmt_value(&self.config.timestamp_format.format(&event.timestamp))
        ));
        parts.push(format!("level={}", self.level_label(event)));

        if let Some(program_name) = self.program_name(event) {
            parts.push(format!("progname={}", escape_logfmt_value(program_name)));
        }

        // The message is always quoted
        match event.payload.message() {
            Message::Value(value) => parts.push(format!(
                "{}={}",
                MSG_KEY,
                quote_logfmt_value(&value.to_string())
            )),
            Message::Error(err) => parts.push(format!(
                "{}={}",
                ERR_KEY,
                quote_logfmt_value(&err.to_string())
            )),
        }

        for (key, value) in event.payload.fields() {
            let formatted_value = match value {
                FieldValue::String(s) => quote_logfmt_value(s),
                FieldValue::Int(i) => i.to_string(),
                FieldValue::Float(f) => f.to_string(),
                FieldValue::Bool(b) => b.to_string(),
                FieldValue::Null => "null".to_string(),
            };
            parts.push(format!("{}={}", escape_logfmt_key(key), formatted_value));
        }

        parts.join(" ")
    }
}

impl LineFormatter for StandardFormatter {
    fn format_line(&self, event: &LogEvent) -> String {
        let mut line = match self.output_format {
            OutputFormat::Text => self.format_text(event),
            OutputFormat::Json => self.format_json(event),
            OutputFormat::Logfmt => self.format_logfmt(event),
        };
        line.push('\n');
        line
    }
}

impl From<OutputFormat> for StandardFormatter {
    fn from(output_format: OutputFormat) -> Self {
        StandardFormatter::new(output_format)
    }
}

/// Escape backslashes, line breaks and tabs so a value cannot forge extra
/// log lines. The escaping is reversible.
pub fn sanitize(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

fn error_to_json(err: &ErrorValue) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    obj.insert("class".to_string(), serde_json::Value::String(err.class.clone()));
    obj.insert(
        "message".to_string(),
        serde_json::Value::String(err.message.clone()),
    );
    if !err.causes.is_empty() {
        obj.insert(
            "causes".to_string(),
            serde_json::Value::Array(
                err.causes
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
        );
    }
    serde_json::Value::Object(obj)
}

/// Keep only characters that are safe in a bare logfmt key
fn escape_logfmt_key(key: &str) -> String {
    let escaped: String = key
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect();
    if escaped.is_empty() {
        "_".to_string()
    } else {
        escaped
    }
}

/// Quote a logfmt value if it contains spaces or special chars
fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=', '\\', '\n', '\r', '\t']) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!("\"{}\"", sanitize(value).replace('"', "\\\""))
}
