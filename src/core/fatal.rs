//! Process termination after a fatal record
//!
//! A fatal event writes its record, then two stack dumps (calling thread
//! first, then every thread), then hands control to a [`Terminator`]. Both
//! the stack source and the terminator are injectable so the sequence can be
//! observed without exiting.

use std::backtrace::Backtrace;
use std::fmt::Write as _;

/// Exit status used after a fatal record.
pub const FATAL_EXIT_CODE: i32 = 255;

/// Attempts made to fit a stack trace before returning it truncated.
const STACK_CAPTURE_ATTEMPTS: usize = 5;

/// Ends the process after a fatal record
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Calls [`std::process::exit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

/// Source of stack trace text
pub trait StackCapture: Send + Sync {
    /// Write up to `buf.len()` bytes of trace text and return the count.
    ///
    /// `all` asks for every live thread instead of only the caller.
    fn capture(&self, buf: &mut [u8], all: bool) -> usize;
}

/// Stack traces from [`std::backtrace`].
///
/// Safe Rust can only unwind the calling thread, so the all-threads dump is
/// the caller's backtrace followed by one line per other thread found under
/// `/proc/self/task` where that exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture;

impl BacktraceCapture {
    fn render(all: bool) -> String {
        let current = std::thread::current();
        let mut out = String::new();
        let _ = write!(
            out,
            "thread '{}' ({:?}):\n{}\n",
            current.name().unwrap_or("<unnamed>"),
            current.id(),
            Backtrace::force_capture()
        );
        if all {
            list_other_threads(&mut out);
        }
        out
    }
}

impl StackCapture for BacktraceCapture {
    fn capture(&self, buf: &mut [u8], all: bool) -> usize {
        let text = Self::render(all);
        let n = text.len().min(buf.len());
        buf[..n].copy_from_slice(&text.as_bytes()[..n]);
        n
    }
}

#[cfg(target_os = "linux")]
fn list_other_threads(out: &mut String) {
    let current_tid = std::fs::read_link("/proc/thread-self")
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));

    let Ok(entries) = std::fs::read_dir("/proc/self/task") else {
        return;
    };
    for entry in entries.flatten() {
        let tid = entry.file_name().to_string_lossy().into_owned();
        if current_tid.as_deref() == Some(tid.as_str()) {
            continue;
        }
        let comm = std::fs::read_to_string(entry.path().join("comm")).unwrap_or_default();
        let _ = writeln!(out, "thread {} [{}]: stack unavailable", tid, comm.trim_end());
    }
}

#[cfg(not(target_os = "linux"))]
fn list_other_threads(_out: &mut String) {}

/// Capture a stack dump, growing the buffer until it fits.
///
/// Starts at 10 000 bytes (100 000 for all threads) and doubles up to five
/// times; a trace that still does not fit comes back truncated.
pub fn stacks(capture: &dyn StackCapture, all: bool) -> Vec<u8> {
    let mut n = if all { 100_000 } else { 10_000 };
    let mut trace = Vec::new();
    for _ in 0..STACK_CAPTURE_ATTEMPTS {
        trace = vec![0u8; n];
        let written = capture.capture(&mut trace, all);
        if written < trace.len() {
            trace.truncate(written);
            return trace;
        }
        n *= 2;
    }
    trace
}
