//! Basic logger usage example
//!
//! Demonstrates logging to stderr at different levels, structured extra
//! data and error payloads.
//!
//! Run with: cargo run --example basic_usage

use lockless_logger::prelude::*;
use lockless_logger::info;
use std::io;

fn main() -> Result<()> {
    println!("=== Lockless Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .destination(Destination::stderr())
        .level(LogLevel::Trace)
        .program_name("basic_usage")
        .build()?;

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Raising the threshold to WARN:");
    logger.set_level(LogLevel::Warn);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");
    println!("   trace enabled: {}", logger.is_trace_enabled());

    println!("\n3. Extra data and a per-call program name:");
    logger.set_level(LogLevel::Info);
    let extra = LogContext::new()
        .with_field("user_id", 12345)
        .with_field("action", "login");
    logger.emit(LogLevel::Info, "User logged in", Some("auth"), Some(&extra));

    println!("\n4. Logging an error value:");
    let failure = io::Error::new(io::ErrorKind::PermissionDenied, "cannot open config");
    logger.error(Message::error(&failure));

    println!("\n5. Formatting macros:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
