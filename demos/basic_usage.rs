//! Basic logger usage example
//!
//! Demonstrates typed fields, level gating and the formatting macros.
//!
//! Run with: cargo run --example basic_usage

use jsonline::prelude::*;
use jsonline::{info, warn};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== jsonline - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .sink(ConsoleSink::stdout())
        .min_level(LogLevel::Debug)
        .caller(true)
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug().msg("This is a debug message");
    logger.info().msg("This is an info message");
    logger.warn().msg("This is a warning message");
    logger.error().msg("This is an error message");

    println!("\n2. Typed fields:");
    let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    let io_err: &dyn std::error::Error = &missing;
    logger
        .info()
        .str("service", "billing")
        .uint16("port", 8443)
        .float64("load", 0.72)
        .dur("uptime", Duration::from_secs(5_400))
        .strs("tags", &["blue", "canary"])
        .bytes("raw", b"\x00binary\xff")
        .timestamp()
        .msg("service ready");
    logger.warn().err(Some(io_err)).msg("using defaults");
    logger
        .info()
        .interface("limits", &serde_json::json!({"rps": 100, "burst": 20}))
        .send();

    println!("\n3. Formatting macros:");
    info!(logger, "Processing {} items", 100);
    warn!(logger, "Retry attempt {} of {}", 3, 5);

    println!("\n4. Minimum level set to WARN - debug and info won't show:");
    let quiet = logger.with_min_level(LogLevel::Warn);
    quiet.debug().msg("Debug message (hidden)");
    quiet.info().msg("Info message (hidden)");
    quiet.warn().msg("Warning message (visible)");

    println!("\n5. HTML-safe escaping:");
    let html = Logger::builder()
        .sink(ConsoleSink::stdout())
        .escape_html(true)
        .build()?;
    html.info().str("snippet", "<b>bold</b> & co").send();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
