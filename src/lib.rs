//! # jsonline
//!
//! A low-overhead structured logger that writes one JSON object per line.
//!
//! Records are built field by field straight into a pooled byte buffer; no
//! intermediate map or string is created, and a record below the configured
//! level costs one comparison.
//!
//! ## Features
//!
//! - **Typed fields**: strings, bytes, integers, floats, durations, times,
//!   errors, raw JSON and any `serde::Serialize` value
//! - **Fast timestamps**: fixed-width ISO-8601 UTC written by digit placement
//! - **Safe output**: every string is escaped, invalid UTF-8 is replaced,
//!   optional HTML-safe escaping
//! - **Fatal records**: stack dumps and process exit after the record
//!
//! ```
//! use jsonline::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new(sink.clone());
//!
//! logger.info().str("path", "/health").uint("status", 200).msg("served");
//!
//! let line: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
//! assert_eq!(line["status"], 200);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, Clock, Event, EventPool, FixedClock, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, Result, Sink, SystemClock, TimeFormat,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    append_bytes, append_fast, append_str, escape, escape_bytes, stacks, BacktraceCapture,
    CallSite, Clock, Event, EventPool, FixedClock, LogLevel, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, ProcessExit, Result, SignedInt, Sink, StackCapture, SystemClock, Terminator,
    TimeFormat, UnsignedInt, DEFAULT_POOL_CAPACITY, DEFAULT_TIME_FIELD, FATAL_EXIT_CODE,
    MAX_RETAINED_CAPACITY,
};
pub use crate::sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink, WriterSink};
