//! Timestamp formatting utilities
//!
//! The default format places digits straight into a fixed-width template
//! (`"2006-01-02T15:04:05.000Z"`) instead of going through a general-purpose
//! formatter. Other formats defer to chrono.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write as _;

use super::error::{LoggerError, Result};
use super::escape::EscapeWriter;

/// Layout equivalent of the fast path, used when a timestamp does not fit it.
const FAST_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Byte template written before the digits are overwritten.
const FAST_TEMPLATE: &[u8; 26] = b"\"2006-01-02T15:04:05.000Z\"";

/// Timestamp format for the time field and `time` fields
///
/// # Examples
///
/// ```
/// use jsonline::TimeFormat;
///
/// // Apache log format
/// let format = TimeFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
/// assert!(format.validate().is_ok());
///
/// // An empty layout selects the fast fixed-width format
/// assert_eq!(TimeFormat::from_layout(""), TimeFormat::Fast);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `"2025-01-08T10:30:45.123Z"`, milliseconds truncated, always UTC
    #[default]
    Fast,

    /// Unix timestamp in seconds, unquoted: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds, unquoted: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds, unquoted: `1736332245123456`
    UnixMicros,

    /// Custom strftime layout, written as an escaped JSON string
    ///
    /// Times are always rendered in UTC, never the local zone: `%z` gives
    /// `+0000` and `%Z` gives `UTC`. Shift the instant before logging it if
    /// a local wall-clock reading is needed.
    Custom(String),
}

impl TimeFormat {
    /// Map a strftime layout to a format; empty selects [`TimeFormat::Fast`].
    pub fn from_layout(layout: &str) -> Self {
        if layout.is_empty() {
            TimeFormat::Fast
        } else {
            TimeFormat::Custom(layout.to_string())
        }
    }

    /// Reject custom layouts chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if let TimeFormat::Custom(layout) = self {
            if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "TimeFormat",
                    format!("invalid strftime layout '{}'", layout),
                ));
            }
        }
        Ok(())
    }

    /// Whether the value is written as a bare JSON number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimeFormat::Unix | TimeFormat::UnixMillis | TimeFormat::UnixMicros
        )
    }

    /// Append `t` as a JSON value in this format.
    pub fn append(&self, buf: &mut Vec<u8>, t: &DateTime<Utc>, escape_html: bool) {
        match self {
            TimeFormat::Fast => append_fast(buf, t),
            TimeFormat::Unix => {
                let _ = write!(buf, "{}", t.timestamp());
            }
            TimeFormat::UnixMillis => {
                let _ = write!(buf, "{}", t.timestamp_millis());
            }
            TimeFormat::UnixMicros => {
                let _ = write!(buf, "{}", t.timestamp_micros());
            }
            TimeFormat::Custom(layout) => {
                buf.push(b'"');
                let _ = write!(EscapeWriter::new(buf, escape_html), "{}", t.format(layout));
                buf.push(b'"');
            }
        }
    }

    /// Format `t` into a standalone JSON value.
    #[must_use]
    pub fn format(&self, t: &DateTime<Utc>) -> String {
        let mut buf = Vec::with_capacity(32);
        self.append(&mut buf, t, false);
        String::from_utf8(buf).unwrap_or_default()
    }
}

/// Append `t` as the quoted literal `"YYYY-MM-DDTHH:MM:SS.mmmZ"`.
///
/// Sub-millisecond precision is truncated. Years outside `0..=9999` and
/// leap-second instants take chrono's formatter with the same layout.
pub fn append_fast(buf: &mut Vec<u8>, t: &DateTime<Utc>) {
    let year = t.year();
    let nanos = t.nanosecond();
    if !(0..=9999).contains(&year) || nanos >= 1_000_000_000 {
        buf.push(b'"');
        let _ = write!(buf, "{}", t.format(FAST_LAYOUT));
        buf.push(b'"');
        return;
    }

    let n = buf.len();
    buf.extend_from_slice(FAST_TEMPLATE);
    let d = &mut buf[n..];

    let mut a = year as u32;
    d[4] = b'0' + (a % 10) as u8;
    a /= 10;
    d[3] = b'0' + (a % 10) as u8;
    a /= 10;
    d[2] = b'0' + (a % 10) as u8;
    d[1] = b'0' + (a / 10) as u8;

    put2(d, 6, t.month());
    put2(d, 9, t.day());
    put2(d, 12, t.hour());
    put2(d, 15, t.minute());
    put2(d, 18, t.second());

    let ms = nanos / 1_000_000;
    d[23] = b'0' + (ms % 10) as u8;
    d[22] = b'0' + (ms / 10 % 10) as u8;
    d[21] = b'0' + (ms / 100) as u8;
}

#[inline]
fn put2(d: &mut [u8], at: usize, v: u32) {
    d[at] = b'0' + (v / 10) as u8;
    d[at + 1] = b'0' + (v % 10) as u8;
}

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
