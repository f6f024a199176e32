//! Free list of event buffers
//!
//! Every accepted log call needs a byte buffer. Buffers released by finished
//! events are parked in a bounded channel and handed out again, so a steady
//! stream of log calls stops allocating once the pool is warm.
//!
//! Ownership moves through the pool: [`EventPool::acquire`] gives the caller
//! the only handle to a buffer and [`EventPool::release`] takes it back. A
//! buffer can therefore never be held by two events at once.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of idle buffers kept.
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

/// Buffers that grew beyond this are freed instead of pooled.
pub const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Capacity of a freshly allocated buffer.
const INITIAL_BUFFER_CAPACITY: usize = 512;

pub struct EventPool {
    free_tx: Sender<Vec<u8>>,
    free_rx: Receiver<Vec<u8>>,
    reused: AtomicU64,
    allocated: AtomicU64,
}

impl EventPool {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Create a pool that keeps at most `capacity` idle buffers.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (free_tx, free_rx) = bounded(capacity.max(1));
        Self {
            free_tx,
            free_rx,
            reused: AtomicU64::new(0),
            allocated: AtomicU64::new(0),
        }
    }

    /// Take an empty buffer, reusing an idle one when available.
    pub fn acquire(&self) -> Vec<u8> {
        match self.free_rx.try_recv() {
            Ok(mut buf) => {
                buf.clear();
                self.reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            Err(_) => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                Vec::with_capacity(INITIAL_BUFFER_CAPACITY)
            }
        }
    }

    /// Return a buffer. Its length is reset; its capacity is kept.
    pub fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        // A full pool just drops the buffer.
        let _ = self.free_tx.try_send(buf);
    }

    /// Number of buffers currently idle in the pool.
    #[inline]
    pub fn idle(&self) -> usize {
        self.free_rx.len()
    }

    /// Acquisitions served from the free list.
    #[inline]
    pub fn reused_count(&self) -> u64 {
        self.reused.load(Ordering::Relaxed)
    }

    /// Acquisitions that had to allocate.
    #[inline]
    pub fn allocated_count(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }
}

impl Default for EventPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPool")
            .field("idle", &self.idle())
            .field("reused", &self.reused_count())
            .field("allocated", &self.allocated_count())
            .finish()
    }
}
