//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The message is
//! formatted straight into the record buffer, and not at all when the level
//! is disabled.
//!
//! # Examples
//!
//! ```
//! use jsonline::prelude::*;
//! use jsonline::info;
//!
//! let logger = Logger::new(MemorySink::new());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```
//!
//! Use the builder methods on [`Event`](crate::Event) when the record needs
//! fields besides the message.

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use jsonline::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use jsonline::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.with_level($level).msgf(::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use jsonline::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use jsonline::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use jsonline::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use jsonline::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use jsonline::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use jsonline::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use jsonline::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use jsonline::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, dump stacks and exit with status 255.
///
/// # Examples
///
/// ```no_run
/// # use jsonline::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use jsonline::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
