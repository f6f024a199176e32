//! Sink trait for record output destinations

use std::io;
use std::sync::Arc;

/// Destination for finished records
///
/// Each record (and each fatal stack dump) arrives in exactly one `write`
/// call. Implementations shared between threads must serialize their writes
/// so that concurrent records never interleave; the engine does not lock
/// around them. Errors are counted by the logger and never retried.
pub trait Sink: Send + Sync {
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    fn name(&self) -> &str {
        "sink"
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
