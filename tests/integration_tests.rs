//! Integration tests for the logger system
//!
//! These tests verify:
//! - Threshold filtering against a real file
//! - Payload shape (msg vs err, extra data, reserved keys)
//! - Header banner and append-only behavior
//! - Log injection prevention
//! - Write failures are swallowed and reported out of band

use lockless_logger::prelude::*;
use std::fmt;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug)]
struct SomeException(&'static str);

impl fmt::Display for SomeException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for SomeException {}

/// Lines after the header banner
fn event_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter(|line| !line.starts_with("# Logfile created on"))
        .collect()
}

fn json_file_logger(path: &std::path::Path, level: LogLevel) -> Logger {
    Logger::builder()
        .level(level)
        .destination(path)
        .output_format(OutputFormat::Json)
        .build()
        .expect("Failed to create logger")
}

#[test]
fn test_threshold_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("scenario.log");
    let logger = json_file_logger(&log_file, LogLevel::Info);

    assert!(logger.emit(LogLevel::Debug, "x", None, None));

    let extra = LogContext::new().with_field("req_id", 42);
    assert!(logger.emit(LogLevel::Warn, "y", None, Some(&extra)));

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines = event_lines(&content);
    assert_eq!(lines.len(), 1);

    let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["level"], "WARN");
    assert_eq!(parsed["msg"], "y");
    assert_eq!(parsed["req_id"], 42);
    assert!(parsed.get("err").is_none());
}

#[test]
fn test_error_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("error.log");
    let logger = json_file_logger(&log_file, LogLevel::Info);

    assert!(logger.error(Message::error(&SomeException("boom"))));

    let content = fs::read_to_string(&log_file).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(event_lines(&content)[0]).unwrap();
    assert_eq!(parsed["err"]["class"], "SomeException");
    assert_eq!(parsed["err"]["message"], "boom");
    assert!(parsed.get("msg").is_none());
}

#[test]
fn test_io_error_converts_to_err_payload() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("io_error.log");
    let logger = json_file_logger(&log_file, LogLevel::Info);

    logger.error(io::Error::new(io::ErrorKind::NotFound, "config missing"));

    let content = fs::read_to_string(&log_file).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(event_lines(&content)[0]).unwrap();
    assert_eq!(parsed["err"]["class"], "Error");
    assert_eq!(parsed["err"]["message"], "config missing");
}

#[test]
fn test_reserved_keys_in_extra_are_superseded() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("reserved.log");
    let logger = json_file_logger(&log_file, LogLevel::Info);

    let extra = LogContext::new()
        .with_field("msg", "spoofed")
        .with_field("err", "spoofed too")
        .with_field("user", "alice");
    logger.emit(LogLevel::Info, "real message", None, Some(&extra));

    let content = fs::read_to_string(&log_file).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(event_lines(&content)[0]).unwrap();
    assert_eq!(parsed["msg"], "real message");
    assert_eq!(parsed["user"], "alice");
    assert!(parsed.get("err").is_none());
}

#[test]
fn test_new_file_has_header_and_one_line_per_event() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fresh.log");

    let logger = Logger::new(log_file.as_path()).expect("Failed to create logger");
    logger.info("hello");

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("# Logfile created on "));
    assert!(lines[1].contains("[INFO ]"));
    assert!(lines[1].ends_with("hello"));
}

#[test]
fn test_existing_file_is_not_truncated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("existing.log");
    fs::write(&log_file, "kept line\n").unwrap();

    let logger = Logger::new(log_file.as_path()).expect("Failed to create logger");
    logger.warn("appended");

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "kept line");
    assert!(lines[1].ends_with("appended"));
    assert!(!content.contains("# Logfile created on"));
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");
    fs::write(&log_file, "").unwrap();

    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Logfmt] {
        let logger = Logger::builder()
            .destination(log_file.as_path())
            .output_format(format)
            .build()
            .unwrap();

        let extra = LogContext::new().with_field("note", "a\nINFO forged");
        logger.emit(
            LogLevel::Info,
            "User login\nERROR [2024-10-17] Fake error injected",
            Some("prog\r\nname"),
            Some(&extra),
        );
        logger.error(Message::error(&SomeException("first\nsecond")));
    }

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6, "Each event should be a single line");
    assert!(!content.contains("\nERROR [2024-10-17]"));
    assert!(!content.contains("\nINFO forged"));
    assert!(!content.contains("\nsecond"));
}

#[test]
fn test_invalid_destination_fails_at_construction() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let err = Logger::new(temp_dir.path()).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

    let err = Logger::new("").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}

#[test]
fn test_null_destination_is_noop() {
    let logger = Logger::new(Destination::None).unwrap();
    assert!(logger.emit(LogLevel::Fatal, "ignored", None, None));
    assert_eq!(logger.metrics().written_count(), 0);
}

/// Sink that refuses every write
struct BrokenSink {
    attempts: AtomicUsize,
}

impl Sink for BrokenSink {
    fn write_all(&self, _buf: &[u8]) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn test_write_failure_is_swallowed_and_reported() {
    let sink = Arc::new(BrokenSink {
        attempts: AtomicUsize::new(0),
    });
    let reported = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let reported_clone = Arc::clone(&reported);

    let logger = Logger::builder()
        .destination(Destination::stream(Arc::clone(&sink)))
        .silent_failures()
        .on_write_failure(Arc::new(move |err| {
            reported_clone.lock().push(err.to_string());
        }))
        .build()
        .unwrap();

    for _ in 0..3 {
        assert!(logger.info("into the void"));
    }

    assert_eq!(sink.attempts.load(Ordering::Relaxed), 3);
    assert_eq!(logger.metrics().failed_count(), 3);

    let reported = reported.lock();
    assert_eq!(reported.len(), 3);
    assert!(reported[0].contains("broken"));
    assert!(reported[0].contains("disconnected"));
}

#[test]
fn test_close_twice_and_emit_after_close() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("closed.log");

    let mut logger = Logger::new(log_file.as_path()).unwrap();
    logger.info("before");
    logger.close();
    logger.close();
    assert!(logger.info("after"));

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(event_lines(&content).len(), 1);
}

#[test]
fn test_logfmt_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("logfmt.log");

    let logger = Logger::builder()
        .destination(log_file.as_path())
        .output_format(OutputFormat::Logfmt)
        .program_name("billing")
        .build()
        .unwrap();

    let mut extra = LogContext::new();
    extra.add_field("user_id", "12345");
    extra.add_field("attempt", 2);
    logger.emit(LogLevel::Info, "User logged in", None, Some(&extra));

    let content = fs::read_to_string(&log_file).unwrap();
    let line = event_lines(&content)[0];
    assert!(line.contains("level=INFO"));
    assert!(line.contains("progname=billing"));
    assert!(line.contains("msg=\"User logged in\""));
    assert!(line.contains("user_id=\"12345\""));
    assert!(line.contains("attempt=2"));
}

#[test]
fn test_timestamp_format_support() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("timestamp.log");

    let logger = Logger::builder()
        .destination(log_file.as_path())
        .formatter_config(
            FormatterConfig::new().with_timestamp_format(TimestampFormat::Custom("%Y".into())),
        )
        .build()
        .unwrap();
    logger.info("dated");

    let content = fs::read_to_string(&log_file).unwrap();
    let line = event_lines(&content)[0];
    let year = chrono::Utc::now().format("%Y").to_string();
    assert!(line.starts_with(&format!("[{}] ", year)));
}
