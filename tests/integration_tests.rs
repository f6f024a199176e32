//! Integration tests for jsonline
//!
//! These tests verify:
//! - Log injection prevention
//! - Record layout and field ordering
//! - File sink output
//! - Timestamp format support
//! - Fatal sequence ordering

use chrono::{TimeZone, Utc};
use jsonline::prelude::*;
use jsonline::{StackCapture, Terminator};
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn fixed() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap() + chrono::Duration::milliseconds(123))
}

fn parse(line: &str) -> serde_json::Value {
    serde_json::from_str(line).expect("record is not valid JSON")
}

#[test]
fn test_log_injection_prevention() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone());

    let malicious = "User login\n{\"level\":\"error\",\"message\":\"Fake\"}\nINFO Continuation";
    logger.info().str("input", malicious).msg(malicious);

    let content = sink.to_string_lossy();
    assert_eq!(content.lines().count(), 1, "record must stay on one line");
    let record = parse(content.trim_end());
    assert_eq!(record["level"], "info");
    assert_eq!(record["message"], malicious);
}

#[test]
fn test_record_layout() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .clock(fixed())
        .build()
        .unwrap();

    logger
        .warn()
        .str("service", "api")
        .uint16("port", 8080)
        .dur("uptime", Duration::from_secs(3723))
        .msg("listening");

    assert_eq!(
        sink.to_string_lossy(),
        concat!(
            "{\"time\":\"2025-01-08T10:30:45.123Z\",\"level\":\"warn\",",
            "\"service\":\"api\",\"port\":8080,\"uptime\":\"1h2m3s\",",
            "\"message\":\"listening\"}\n"
        )
    );
}

#[test]
fn test_caller_field_position() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .clock(fixed())
        .caller(true)
        .build()
        .unwrap();

    let line = line!() + 1;
    logger.error().int("code", 7).send();

    assert_eq!(
        sink.to_string_lossy(),
        format!(
            "{{\"time\":\"2025-01-08T10:30:45.123Z\",\"level\":\"error\",\"caller\":\"integration_tests.rs:{}\",\"code\":7}}\n",
            line
        )
    );
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let sink = FileSink::open(&log_file).expect("Failed to open file sink");
    let logger = Logger::new(sink);

    for i in 0..10 {
        logger.info().int("i", i).msg("entry");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 10);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(parse(line)["i"], i as i64);
    }
    assert_eq!(logger.metrics().events_written(), 10);
}

#[test]
fn test_file_sink_open_error_has_context() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("no/such/dir/app.log");

    let err = FileSink::open(&missing).unwrap_err();
    assert!(matches!(err, LoggerError::IoOperation { .. }));
    assert!(err.to_string().contains("app.log"));
}

#[test]
fn test_writer_sink() {
    let sink = Arc::new(WriterSink::new(Vec::new()));
    let logger = Logger::new(Arc::clone(&sink));
    logger.debug().bool("ok", true).send();
    drop(logger);

    let bytes = Arc::try_unwrap(sink).ok().unwrap().into_inner();
    let record = parse(std::str::from_utf8(&bytes).unwrap().trim_end());
    assert_eq!(record["ok"], true);
    assert_eq!(record["level"], "debug");
}

#[test]
fn test_timestamp_format_fast() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .clock(fixed())
        .time_format(TimeFormat::Fast)
        .build()
        .unwrap();
    logger.info().send();

    let record = parse(&sink.lines()[0]);
    assert_eq!(record["time"], "2025-01-08T10:30:45.123Z");
}

#[test]
fn test_timestamp_format_unix_millis() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .clock(fixed())
        .time_format(TimeFormat::UnixMillis)
        .build()
        .unwrap();
    logger.info().send();

    let record = parse(&sink.lines()[0]);
    assert_eq!(record["time"], 1_736_332_245_123i64);
}

#[test]
fn test_timestamp_format_custom() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .clock(fixed())
        .time_field("@ts")
        .time_format(TimeFormat::Custom("%d/%m/%Y %H:%M".to_string()))
        .build()
        .unwrap();
    logger.info().time("started", &Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap()).send();

    let record = parse(&sink.lines()[0]);
    assert_eq!(record["@ts"], "08/01/2025 10:30");
    assert_eq!(record["started"], "31/12/2024 23:59");
}

#[test]
fn test_level_parsing_from_config() {
    let level: LogLevel = "WARNING".parse().unwrap();
    let sink = MemorySink::new();
    let logger = Logger::builder().sink(sink.clone()).min_level(level).build().unwrap();

    logger.info().msg("skip");
    logger.warn().msg("keep");
    assert_eq!(sink.lines().len(), 1);

    assert!(matches!("loud".parse::<LogLevel>(), Err(LoggerError::InvalidLevel(_))));
}

#[test]
fn test_special_characters_escaping() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .escape_html(true)
        .build()
        .unwrap();

    let text = "quote \" backslash \\ tab \t bell \u{7} <script>&";
    logger.info().str("text", text).bytes("raw", b"\xc3\x28").send();

    let line = &sink.lines()[0];
    assert!(!line.contains('<'));
    assert!(!line.contains('&'));
    let record = parse(line);
    assert_eq!(record["text"], text);
    assert_eq!(record["raw"], "\u{fffd}(");
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

struct RecordingSink(Arc<Recorder>);

impl Sink for RecordingSink {
    fn write(&self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .events
            .lock()
            .push(format!("write:{}", String::from_utf8_lossy(buf).trim_end()));
        Ok(buf.len())
    }
}

struct RecordingStacks(Arc<Recorder>);

impl StackCapture for RecordingStacks {
    fn capture(&self, buf: &mut [u8], all: bool) -> usize {
        self.0.events.lock().push(format!("capture:{}", all));
        let text: &[u8] = if all { b"all" } else { b"one" };
        buf[..text.len()].copy_from_slice(text);
        text.len()
    }
}

struct RecordingExit(Arc<Recorder>);

impl Terminator for RecordingExit {
    fn terminate(&self, code: i32) {
        self.0.events.lock().push(format!("exit:{}", code));
    }
}

#[test]
fn test_fatal_sequence_order() {
    let recorder = Arc::new(Recorder::default());
    let logger = Logger::builder()
        .sink(RecordingSink(Arc::clone(&recorder)))
        .clock(fixed())
        .stack_capture(RecordingStacks(Arc::clone(&recorder)))
        .terminator(RecordingExit(Arc::clone(&recorder)))
        .build()
        .unwrap();

    logger.fatal().msg("db down");

    let events = recorder.events.lock().clone();
    assert_eq!(
        events,
        vec![
            "write:{\"time\":\"2025-01-08T10:30:45.123Z\",\"level\":\"fatal\",\"message\":\"db down\"}".to_string(),
            "capture:false".to_string(),
            "write:one".to_string(),
            "capture:true".to_string(),
            "write:all".to_string(),
            "exit:255".to_string(),
        ]
    );
}

#[test]
fn test_metrics_track_outcomes() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .min_level(LogLevel::Info)
        .build()
        .unwrap();

    logger.debug().msg("gated");
    logger.info().msg("written");
    let unfinished = logger.warn().str("k", "v");
    drop(unfinished);

    let metrics = logger.metrics();
    assert_eq!(metrics.events_written(), 1);
    assert_eq!(metrics.events_discarded(), 1);
    assert_eq!(metrics.write_failures(), 0);
    assert_eq!(sink.lines().len(), 1);
}
