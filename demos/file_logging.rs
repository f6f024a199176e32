//! File logging example
//!
//! Writes records to a file and reads them back as JSON.
//!
//! Run with: cargo run --example file_logging

use jsonline::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== jsonline - File Logging Example ===\n");

    let path = std::env::temp_dir().join("jsonline-demo.log");
    let _ = std::fs::remove_file(&path);

    let logger = Logger::builder()
        .sink(FileSink::open(&path)?)
        .time_format(TimeFormat::UnixMillis)
        .build()?;

    println!("1. Logging to {}", path.display());
    logger.info().msg("Application started");
    logger.debug().str("path", "/etc/app.toml").msg("Loading configuration");
    logger.warn().msg("Using default settings for some options");
    logger.info().int("pool_size", 16).msg("Database connection established");
    logger.error().str("plugin", "metrics").msg("Failed to load optional plugin");

    println!("\n2. Reading records back:");
    let content = std::fs::read_to_string(&path)?;
    for line in content.lines() {
        let record: serde_json::Value = serde_json::from_str(line)?;
        println!(
            "   [{}] {} {}",
            record["level"].as_str().unwrap_or("?"),
            record["time"],
            record["message"].as_str().unwrap_or("")
        );
    }

    println!("\n3. Metrics:");
    let metrics = logger.metrics();
    println!("   written: {}", metrics.events_written());
    println!("   failures: {}", metrics.write_failures());
    println!("   pooled buffers reused: {}", logger.pool().reused_count());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
