//! Sink over any `std::io::Write`

use crate::core::Sink;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Serializes records into a wrapped writer.
///
/// The lock is held for one `write_all`, so a record reaches the writer in
/// one piece even when many threads log at once.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Flush the wrapped writer.
    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.writer.lock().write_all(buf)?;
        Ok(buf.len())
    }

    fn name(&self) -> &str {
        "writer"
    }
}
