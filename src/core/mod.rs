//! Core encoder types and traits

pub mod caller;
pub mod encode;
pub mod error;
pub mod escape;
pub mod event;
pub mod fatal;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pool;
pub mod sink;
pub mod timestamp;

pub use caller::CallSite;
pub use encode::{SignedInt, UnsignedInt};
pub use error::{LoggerError, Result};
pub use escape::{append_bytes, append_str, escape, escape_bytes};
pub use event::Event;
pub use fatal::{
    stacks, BacktraceCapture, ProcessExit, StackCapture, Terminator, FATAL_EXIT_CODE,
};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_TIME_FIELD};
pub use metrics::LoggerMetrics;
pub use pool::{EventPool, DEFAULT_POOL_CAPACITY, MAX_RETAINED_CAPACITY};
pub use sink::Sink;
pub use timestamp::{append_fast, Clock, FixedClock, SystemClock, TimeFormat};
