//! Main logger implementation

use super::{
    caller::CallSite,
    error::{LoggerError, Result},
    event::Event,
    fatal::{BacktraceCapture, ProcessExit, StackCapture, Terminator},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    pool::EventPool,
    sink::Sink,
    timestamp::{Clock, SystemClock, TimeFormat},
};
use crate::sinks::ConsoleSink;
use std::fmt;
use std::sync::Arc;

/// Key of the header time field unless configured otherwise.
pub const DEFAULT_TIME_FIELD: &str = "time";

/// Level-gated source of [`Event`]s
///
/// A logger is immutable once built. Cloning is cheap: clones share the
/// sink, pool, clock and metrics. Use the `with_*` methods to derive a
/// differently configured logger.
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    caller: bool,
    escape_html: bool,
    /// `{"<time field>":`, written first in every record
    time_key: Arc<[u8]>,
    time_format: TimeFormat,
    sink: Arc<dyn Sink>,
    pool: Arc<EventPool>,
    clock: Arc<dyn Clock>,
    terminator: Arc<dyn Terminator>,
    stack_capture: Arc<dyn StackCapture>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with default settings writing to `sink`.
    #[must_use]
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        Self::builder()
            .sink(sink)
            .build_unchecked()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use jsonline::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Info)
    ///     .caller(true)
    ///     .time_format(TimeFormat::UnixMillis)
    ///     .sink(MemorySink::new())
    ///     .build()
    ///     .unwrap();
    /// assert!(!logger.enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Start an event at `level`.
    ///
    /// Below the minimum level this returns a disabled event without
    /// touching the pool or the clock. Otherwise the event already holds the
    /// time, level and (if enabled) caller of the code calling this method.
    #[track_caller]
    pub fn with_level(&self, level: LogLevel) -> Event<'_> {
        if level < self.min_level {
            return Event::disabled();
        }

        let mut buf = self.pool.acquire();
        buf.extend_from_slice(&self.time_key);
        self.time_format
            .append(&mut buf, &self.clock.now(), self.escape_html);
        buf.extend_from_slice(level.header());
        if self.caller {
            CallSite::caller().append(&mut buf);
        }

        Event::new(self, buf, level == LogLevel::Fatal)
    }

    #[track_caller]
    pub fn debug(&self) -> Event<'_> {
        self.with_level(LogLevel::Debug)
    }

    #[track_caller]
    pub fn info(&self) -> Event<'_> {
        self.with_level(LogLevel::Info)
    }

    #[track_caller]
    pub fn warn(&self) -> Event<'_> {
        self.with_level(LogLevel::Warn)
    }

    #[track_caller]
    pub fn error(&self) -> Event<'_> {
        self.with_level(LogLevel::Error)
    }

    /// Start a fatal event.
    ///
    /// Finishing it writes the record and both stack dumps, then terminates
    /// the process with exit status 255 (through the configured
    /// [`Terminator`]).
    #[track_caller]
    pub fn fatal(&self) -> Event<'_> {
        self.with_level(LogLevel::Fatal)
    }

    /// Whether records at `level` pass the gate.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    #[inline]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// A copy of this logger with another minimum level.
    #[must_use]
    pub fn with_min_level(&self, level: LogLevel) -> Self {
        Self {
            min_level: level,
            ..self.clone()
        }
    }

    /// A copy of this logger writing to another sink.
    #[must_use]
    pub fn with_sink<S: Sink + 'static>(&self, sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
            ..self.clone()
        }
    }

    /// Get reference to logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn pool(&self) -> &EventPool {
        &self.pool
    }

    pub fn time_format(&self) -> &TimeFormat {
        &self.time_format
    }

    #[inline]
    pub(crate) fn escape_html(&self) -> bool {
        self.escape_html
    }

    #[inline]
    pub(crate) fn sink(&self) -> &dyn Sink {
        &*self.sink
    }

    #[inline]
    pub(crate) fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    #[inline]
    pub(crate) fn terminator(&self) -> &dyn Terminator {
        &*self.terminator
    }

    #[inline]
    pub(crate) fn stack_capture(&self) -> &dyn StackCapture {
        &*self.stack_capture
    }
}

impl Default for Logger {
    /// Debug level, writing to stderr.
    fn default() -> Self {
        LoggerBuilder::new().build_unchecked()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("caller", &self.caller)
            .field("escape_html", &self.escape_html)
            .field("time_key", &String::from_utf8_lossy(&self.time_key))
            .field("time_format", &self.time_format)
            .field("sink", &self.sink.name())
            .field("pool", &self.pool)
            .finish()
    }
}

/// Builder for creating a Logger with custom configuration
pub struct LoggerBuilder {
    min_level: LogLevel,
    caller: bool,
    escape_html: bool,
    time_field: String,
    time_format: TimeFormat,
    sink: Option<Arc<dyn Sink>>,
    pool: Option<Arc<EventPool>>,
    clock: Arc<dyn Clock>,
    terminator: Arc<dyn Terminator>,
    stack_capture: Arc<dyn StackCapture>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Debug,
            caller: false,
            escape_html: false,
            time_field: DEFAULT_TIME_FIELD.to_string(),
            time_format: TimeFormat::Fast,
            sink: None,
            pool: None,
            clock: Arc::new(SystemClock),
            terminator: Arc::new(ProcessExit),
            stack_capture: Arc::new(BacktraceCapture),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add `"caller":"<file>:<line>"` to every record
    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, enabled: bool) -> Self {
        self.caller = enabled;
        self
    }

    /// Escape `<`, `>` and `&` in string values
    #[must_use = "builder methods return a new value"]
    pub fn escape_html(mut self, enabled: bool) -> Self {
        self.escape_html = enabled;
        self
    }

    /// Key of the leading time field. Empty restores `"time"`.
    #[must_use = "builder methods return a new value"]
    pub fn time_field(mut self, field: impl Into<String>) -> Self {
        self.time_field = field.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Set the output destination. Defaults to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Share an existing buffer pool instead of creating one.
    #[must_use = "builder methods return a new value"]
    pub fn pool(mut self, pool: Arc<EventPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace process exit after fatal records.
    #[must_use = "builder methods return a new value"]
    pub fn terminator<T: Terminator + 'static>(mut self, terminator: T) -> Self {
        self.terminator = Arc::new(terminator);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack_capture<S: StackCapture + 'static>(mut self, capture: S) -> Self {
        self.stack_capture = Arc::new(capture);
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidConfiguration`] if the time field is not a
    /// plain JSON key or the custom time layout does not parse.
    pub fn build(self) -> Result<Logger> {
        validate_time_field(&self.time_field)?;
        self.time_format.validate()?;
        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> Logger {
        let field = if self.time_field.is_empty() {
            DEFAULT_TIME_FIELD
        } else {
            self.time_field.as_str()
        };
        let mut time_key = Vec::with_capacity(field.len() + 4);
        time_key.extend_from_slice(b"{\"");
        time_key.extend_from_slice(field.as_bytes());
        time_key.extend_from_slice(b"\":");

        Logger {
            min_level: self.min_level,
            caller: self.caller,
            escape_html: self.escape_html,
            time_key: time_key.into(),
            time_format: self.time_format,
            sink: self
                .sink
                .unwrap_or_else(|| Arc::new(ConsoleSink::stderr())),
            pool: self.pool.unwrap_or_default(),
            clock: self.clock,
            terminator: self.terminator,
            stack_capture: self.stack_capture,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_time_field(field: &str) -> Result<()> {
    match field
        .chars()
        .find(|&c| c == '"' || c == '\\' || c.is_control())
    {
        Some(c) => Err(LoggerError::config(
            "time_field",
            format!("{:?} contains {:?}, which needs escaping", field, c),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timestamp::FixedClock;
    use crate::sinks::MemorySink;
    use chrono::{TimeZone, Utc};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap())
    }

    fn logger(sink: &MemorySink) -> Logger {
        Logger::builder()
            .sink(sink.clone())
            .clock(fixed_clock())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let logger = LoggerBuilder::default().build().unwrap();
        assert_eq!(logger.min_level(), LogLevel::Debug);
        assert!(!logger.caller);
        assert!(!logger.escape_html);
        assert_eq!(&*logger.time_key, b"{\"time\":");
        assert_eq!(logger.time_format(), &TimeFormat::Fast);
    }

    #[test]
    fn test_default_logger_writes_to_stderr() {
        let logger = Logger::default();
        assert_eq!(logger.sink().name(), "stderr");
        assert!(logger.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_header_layout() {
        let sink = MemorySink::new();
        logger(&sink).info().msg("hello");
        assert_eq!(
            sink.to_string_lossy(),
            "{\"time\":\"2025-01-08T10:30:45.000Z\",\"level\":\"info\",\"message\":\"hello\"}\n"
        );
    }

    #[test]
    fn test_custom_time_field_and_numeric_format() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .clock(fixed_clock())
            .time_field("ts")
            .time_format(TimeFormat::Unix)
            .build()
            .unwrap();
        logger.warn().send();
        assert_eq!(
            sink.to_string_lossy(),
            "{\"ts\":1736332245,\"level\":\"warn\"}\n"
        );
    }

    #[test]
    fn test_empty_time_field_means_default() {
        let logger = Logger::builder().time_field("").build().unwrap();
        assert_eq!(&*logger.time_key, b"{\"time\":");
    }

    #[test]
    fn test_invalid_time_field_rejected() {
        for field in ["a\"b", "a\\b", "a\nb"] {
            let err = Logger::builder().time_field(field).build().unwrap_err();
            assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn test_invalid_time_layout_rejected() {
        let err = Logger::builder()
            .time_format(TimeFormat::Custom("%Y-%Q".to_string()))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_level_gate() {
        let sink = MemorySink::new();
        let logger = logger(&sink).with_min_level(LogLevel::Warn);

        assert!(!logger.debug().enabled());
        assert!(!logger.info().enabled());
        assert!(logger.warn().enabled());

        logger.info().str("k", "v").msg("dropped");
        logger.error().msg("kept");

        assert_eq!(sink.lines().len(), 1);
        assert!(sink.to_string_lossy().contains("\"level\":\"error\""));
    }

    #[test]
    fn test_disabled_event_does_not_touch_pool() {
        let sink = MemorySink::new();
        let logger = logger(&sink).with_min_level(LogLevel::Error);
        for _ in 0..10 {
            logger.debug().int("n", 1).msg("nope");
        }
        assert_eq!(logger.pool().allocated_count(), 0);
        assert_eq!(logger.pool().reused_count(), 0);
        assert_eq!(logger.metrics().events_discarded(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_caller_points_at_call_site() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .clock(fixed_clock())
            .caller(true)
            .build()
            .unwrap();
        let line = line!() + 1;
        logger.info().msg("here");

        let expected = format!("\"caller\":\"logger.rs:{}\"", line);
        assert!(
            sink.to_string_lossy().contains(&expected),
            "missing {} in {}",
            expected,
            sink.to_string_lossy()
        );
    }

    #[test]
    fn test_derived_loggers_share_pool_and_metrics() {
        let sink = MemorySink::new();
        let base = logger(&sink);
        let other_sink = MemorySink::new();
        let derived = base.with_sink(other_sink.clone());

        base.info().msg("a");
        derived.info().msg("b");

        assert_eq!(sink.lines().len(), 1);
        assert_eq!(other_sink.lines().len(), 1);
        assert_eq!(base.metrics().events_written(), 2);
        assert_eq!(base.pool().reused_count(), 1);
    }

    #[test]
    fn test_debug_impl_names_sink() {
        let logger = Logger::new(MemorySink::new());
        let text = format!("{:?}", logger);
        assert!(text.contains("sink: \"memory\""));
    }
}
