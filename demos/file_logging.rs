//! File logging example
//!
//! Demonstrates the header banner on a new file, append-only reopening,
//! JSON output and persistent context fields.
//!
//! Run with: cargo run --example file_logging

use lockless_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Lockless Logger - File Logging Example ===\n");

    let log_path = std::env::temp_dir().join("lockless_logger_demo.log");
    // Start fresh so the banner shows up
    let _ = fs::remove_file(&log_path);

    {
        let logger = Logger::builder()
            .destination(log_path.as_path())
            .output_format(OutputFormat::Json)
            .context_field("service", "file_logging")
            .build()?;

        logger.info("Application started");

        let _request = logger.with_context("request_id", "req-001");
        let extra = LogContext::new().with_field("rows", 42);
        logger.emit(LogLevel::Info, "Query finished", None, Some(&extra));
    }

    // Reopening appends and does not write a second banner
    let mut logger = Logger::new(log_path.as_path())?;
    logger.warn("Reopened in text format");
    logger.close();

    println!("Contents of {}:\n", log_path.display());
    print!("{}", fs::read_to_string(&log_path)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
