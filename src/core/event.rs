//! Event builder: typed fields appended straight into a JSON buffer
//!
//! An [`Event`] is handed out by [`Logger::with_level`] and its level
//! shortcuts. It owns a pooled byte buffer that already holds the record
//! header (`{"time":...,"level":"..."`). Every field method appends
//! `,"key":value` and returns the event for chaining; [`Event::msg`] or
//! [`Event::send`] closes the object, writes it to the sink and gives the
//! buffer back to the pool.
//!
//! An event below the logger's level is *disabled*: it holds no buffer and
//! every method on it returns immediately.
//!
//! ```
//! use jsonline::{Logger, MemorySink};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new(sink.clone());
//!
//! logger.info()
//!     .str("user", "ann")
//!     .int("retries", 3)
//!     .msg("login ok");
//!
//! assert!(sink.to_string_lossy().ends_with(r#""level":"info","user":"ann","retries":3,"message":"login ok"}
//! "#));
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::time::Duration;

use super::caller::CallSite;
use super::encode::{
    append_bool, append_duration, append_f64, append_i64, append_u64, SignedInt, UnsignedInt,
};
use super::escape::{append_bytes, append_str, EscapeWriter};
use super::fatal::{stacks, FATAL_EXIT_CODE};
use super::logger::Logger;

/// One in-flight log record
#[must_use = "an event writes nothing until `msg` or `send` is called"]
pub struct Event<'a> {
    inner: Option<ActiveEvent<'a>>,
}

struct ActiveEvent<'a> {
    buf: Vec<u8>,
    fatal: bool,
    escape_html: bool,
    logger: &'a Logger,
}

impl<'a> ActiveEvent<'a> {
    #[inline]
    fn key(&mut self, key: &str) {
        self.buf.push(b',');
        append_str(&mut self.buf, key, false);
        self.buf.push(b':');
    }

    #[inline]
    fn str(&mut self, value: &str) {
        append_str(&mut self.buf, value, self.escape_html);
    }

    fn error(&mut self, err: Option<&dyn std::error::Error>) {
        match err {
            Some(err) => {
                self.buf.push(b'"');
                let _ = write!(EscapeWriter::new(&mut self.buf, self.escape_html), "{}", err);
                self.buf.push(b'"');
            }
            None => self.buf.extend_from_slice(b"null"),
        }
    }

    fn time(&mut self, t: &DateTime<Utc>) {
        self.logger
            .time_format()
            .append(&mut self.buf, t, self.escape_html);
    }

    /// Close the object, write it, run the fatal sequence if needed and
    /// return the buffer to the pool.
    fn finish(mut self) {
        self.buf.extend_from_slice(b"}\n");
        let logger = self.logger;
        let metrics = logger.metrics();

        match logger.sink().write(&self.buf) {
            Ok(_) => metrics.record_written(),
            Err(_) => metrics.record_write_failure(),
        };

        if self.fatal {
            metrics.record_fatal();
            let capture = logger.stack_capture();
            let _ = logger.sink().write(&stacks(capture, false));
            let _ = logger.sink().write(&stacks(capture, true));
            logger.terminator().terminate(FATAL_EXIT_CODE);
        }

        logger.pool().release(self.buf);
    }
}

impl<'a> Event<'a> {
    pub(crate) fn new(logger: &'a Logger, buf: Vec<u8>, fatal: bool) -> Self {
        Self {
            inner: Some(ActiveEvent {
                buf,
                fatal,
                escape_html: logger.escape_html(),
                logger,
            }),
        }
    }

    /// An event that ignores everything.
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    /// Whether this event will produce a record.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.inner.is_some()
    }

    #[inline]
    fn field(mut self, key: &str, write: impl FnOnce(&mut ActiveEvent<'a>)) -> Self {
        if let Some(active) = self.inner.as_mut() {
            active.key(key);
            write(active);
        }
        self
    }

    #[inline]
    fn array<T>(
        self,
        key: &str,
        items: &[T],
        mut each: impl FnMut(&mut ActiveEvent<'a>, &T),
    ) -> Self {
        self.field(key, |e| {
            e.buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i != 0 {
                    e.buf.push(b',');
                }
                each(e, item);
            }
            e.buf.push(b']');
        })
    }

    pub fn bool(self, key: &str, b: bool) -> Self {
        self.field(key, |e| append_bool(&mut e.buf, b))
    }

    pub fn bools(self, key: &str, b: &[bool]) -> Self {
        self.array(key, b, |e, &v| append_bool(&mut e.buf, v))
    }

    pub fn int(self, key: &str, i: isize) -> Self {
        self.int64(key, i as i64)
    }

    pub fn int8(self, key: &str, i: i8) -> Self {
        self.int64(key, i64::from(i))
    }

    pub fn int16(self, key: &str, i: i16) -> Self {
        self.int64(key, i64::from(i))
    }

    pub fn int32(self, key: &str, i: i32) -> Self {
        self.int64(key, i64::from(i))
    }

    pub fn int64(self, key: &str, i: i64) -> Self {
        self.field(key, |e| append_i64(&mut e.buf, i))
    }

    /// Array of any signed integers, `isize` included.
    pub fn ints<I: SignedInt>(self, key: &str, ints: &[I]) -> Self {
        self.array(key, ints, |e, &v| append_i64(&mut e.buf, v.to_i64()))
    }

    pub fn int64s(self, key: &str, ints: &[i64]) -> Self {
        self.ints(key, ints)
    }

    pub fn uint(self, key: &str, u: usize) -> Self {
        self.uint64(key, u as u64)
    }

    pub fn uint8(self, key: &str, u: u8) -> Self {
        self.uint64(key, u64::from(u))
    }

    pub fn uint16(self, key: &str, u: u16) -> Self {
        self.uint64(key, u64::from(u))
    }

    pub fn uint32(self, key: &str, u: u32) -> Self {
        self.uint64(key, u64::from(u))
    }

    pub fn uint64(self, key: &str, u: u64) -> Self {
        self.field(key, |e| append_u64(&mut e.buf, u))
    }

    /// Array of any unsigned integers, `usize` included.
    pub fn uints<U: UnsignedInt>(self, key: &str, uints: &[U]) -> Self {
        self.array(key, uints, |e, &v| append_u64(&mut e.buf, v.to_u64()))
    }

    pub fn uint64s(self, key: &str, uints: &[u64]) -> Self {
        self.uints(key, uints)
    }

    /// Widened to `f64` before formatting.
    pub fn float32(self, key: &str, f: f32) -> Self {
        self.float64(key, f64::from(f))
    }

    pub fn float64(self, key: &str, f: f64) -> Self {
        self.field(key, |e| append_f64(&mut e.buf, f))
    }

    pub fn floats32(self, key: &str, f: &[f32]) -> Self {
        self.array(key, f, |e, &v| append_f64(&mut e.buf, f64::from(v)))
    }

    pub fn floats64(self, key: &str, f: &[f64]) -> Self {
        self.array(key, f, |e, &v| append_f64(&mut e.buf, v))
    }

    /// Quoted unit-suffixed text, e.g. `"1.5s"`.
    pub fn dur(self, key: &str, d: Duration) -> Self {
        self.field(key, |e| append_duration(&mut e.buf, d))
    }

    pub fn durs(self, key: &str, d: &[Duration]) -> Self {
        self.array(key, d, |e, &v| append_duration(&mut e.buf, v))
    }

    pub fn str(self, key: &str, val: &str) -> Self {
        self.field(key, |e| e.str(val))
    }

    pub fn strs<S: AsRef<str>>(self, key: &str, vals: &[S]) -> Self {
        self.array(key, vals, |e, v| e.str(v.as_ref()))
    }

    /// Bytes escaped as text, read in place.
    ///
    /// Invalid UTF-8 is replaced byte by byte. The slice is borrowed for the
    /// duration of the call only.
    pub fn bytes(self, key: &str, val: &[u8]) -> Self {
        self.field(key, |e| append_bytes(&mut e.buf, val, e.escape_html))
    }

    /// Formatted with the logger's time format.
    pub fn time(self, key: &str, t: &DateTime<Utc>) -> Self {
        self.field(key, |e| e.time(t))
    }

    pub fn times(self, key: &str, t: &[DateTime<Utc>]) -> Self {
        self.array(key, t, |e, v| e.time(v))
    }

    /// `"timestamp":<unix seconds>` from the logger's clock.
    pub fn timestamp(self) -> Self {
        self.field("timestamp", |e| {
            let now = e.logger.clock().now();
            append_i64(&mut e.buf, now.timestamp())
        })
    }

    /// `"error":"<message>"`, or `"error":null` when there is no error.
    pub fn err(self, err: Option<&dyn std::error::Error>) -> Self {
        self.field("error", |e| e.error(err))
    }

    pub fn errs(self, key: &str, errs: &[Option<&dyn std::error::Error>]) -> Self {
        self.array(key, errs, |e, &v| e.error(v))
    }

    /// Copy pre-encoded JSON verbatim.
    ///
    /// Nothing is validated: malformed input produces a malformed record.
    pub fn raw_json(self, key: &str, json: &[u8]) -> Self {
        self.field(key, |e| e.buf.extend_from_slice(json))
    }

    /// Any serializable value, encoded with `serde_json` and written as an
    /// escaped JSON string: `vec![1, 2]` becomes `"[1,2]"`.
    ///
    /// A value that fails to serialize becomes the string
    /// `"marshaling error: <reason>"`; the rest of the record is unaffected.
    pub fn interface<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Self {
        self.field(key, |e| match serde_json::to_vec(value) {
            Ok(marshaled) => append_bytes(&mut e.buf, &marshaled, e.escape_html),
            Err(err) => {
                e.buf.push(b'"');
                let _ = write!(
                    EscapeWriter::new(&mut e.buf, e.escape_html),
                    "marshaling error: {}",
                    err
                );
                e.buf.push(b'"');
            }
        })
    }

    /// Add `"caller":"<file>:<line>"` for the code calling this method.
    #[track_caller]
    pub fn caller(self) -> Self {
        let site = CallSite::caller();
        self.caller_site(site)
    }

    /// Add `"caller"` from an externally resolved location.
    pub fn caller_site(mut self, site: CallSite<'_>) -> Self {
        if let Some(active) = self.inner.as_mut() {
            site.append(&mut active.buf);
        }
        self
    }

    /// Finish with `"message":"<msg>"` and write the record.
    pub fn msg(mut self, msg: &str) {
        if let Some(mut active) = self.inner.take() {
            active.buf.extend_from_slice(b",\"message\":");
            active.str(msg);
            active.finish();
        }
    }

    /// Finish with a formatted message.
    ///
    /// The arguments are formatted straight into the record, and not at all
    /// when the event is disabled.
    pub fn msgf(mut self, args: fmt::Arguments<'_>) {
        if let Some(mut active) = self.inner.take() {
            active.buf.extend_from_slice(b",\"message\":");
            match args.as_str() {
                Some(s) => active.str(s),
                None => {
                    active.buf.push(b'"');
                    let _ = EscapeWriter::new(&mut active.buf, active.escape_html).write_fmt(args);
                    active.buf.push(b'"');
                }
            }
            active.finish();
        }
    }

    /// Write the record without a message.
    pub fn send(mut self) {
        if let Some(active) = self.inner.take() {
            active.finish();
        }
    }
}

impl Drop for Event<'_> {
    fn drop(&mut self) {
        if let Some(active) = self.inner.take() {
            let logger = active.logger;
            logger.metrics().record_discarded();
            logger.pool().release(active.buf);
        }
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(active) => f
                .debug_struct("Event")
                .field("buf", &String::from_utf8_lossy(&active.buf))
                .field("fatal", &active.fatal)
                .finish(),
            None => f.write_str("Event(disabled)"),
        }
    }
}
