//! Fatal record example
//!
//! A fatal record is written, followed by the calling thread's stack and a
//! dump of every thread, then the process exits with status 255. This demo
//! swaps in a terminator that only reports the exit code.
//!
//! Run with: cargo run --example fatal_handling

use jsonline::prelude::*;
use jsonline::Terminator;

struct ReportOnly;

impl Terminator for ReportOnly {
    fn terminate(&self, code: i32) {
        println!("\n(would exit with status {})", code);
    }
}

fn main() -> Result<()> {
    println!("=== jsonline - Fatal Handling Example ===\n");

    let logger = Logger::builder()
        .sink(ConsoleSink::stdout())
        .terminator(ReportOnly)
        .build()?;

    let worker = std::thread::Builder::new()
        .name("worker".to_string())
        .spawn(|| std::thread::park())?;

    logger
        .fatal()
        .str("component", "storage")
        .msg("unrecoverable state");

    worker.thread().unpark();
    let _ = worker.join();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
