//! Call-site capture for the `caller` field

use std::panic::Location;

use super::encode::append_u64;
use super::escape::append_unquoted;

/// Source location written as `"caller":"<file>:<line>"`
///
/// Only the final path segment of the file is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    file: &'a str,
    line: u64,
}

impl<'a> CallSite<'a> {
    /// Placeholder for a location that could not be resolved.
    pub const UNKNOWN: CallSite<'static> = CallSite {
        file: "???",
        line: 1,
    };

    /// Build from externally resolved frame data.
    ///
    /// A missing file gives [`CallSite::UNKNOWN`]; negative lines become 0.
    pub fn new(file: Option<&'a str>, line: i64) -> Self {
        match file {
            Some(file) => CallSite {
                file: base_name(file),
                line: line.max(0) as u64,
            },
            None => CallSite::UNKNOWN,
        }
    }

    pub fn from_location(location: &'a Location<'a>) -> Self {
        CallSite {
            file: base_name(location.file()),
            line: u64::from(location.line()),
        }
    }

    /// The location of the caller of the `#[track_caller]` chain this is
    /// called from.
    #[track_caller]
    pub fn caller() -> CallSite<'static> {
        CallSite::from_location(Location::caller())
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub(crate) fn append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b",\"caller\":\"");
        append_unquoted(buf, self.file, false);
        buf.push(b':');
        append_u64(buf, self.line);
        buf.push(b'"');
    }
}

fn base_name(path: &str) -> &str {
    match path.rfind(&['/', '\\'][..]) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}
