//! Publication gate keyed by session generation.
//!
//! Every scanning session gets a fresh generation number. Work tagged with
//! a generation may only touch the sink and tracker while that generation is
//! still open. Stopping takes the write lock, so once `close` returns no
//! older work can publish.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

#[derive(Debug, Default)]
pub(crate) struct SessionGate {
    /// Generation currently allowed to publish.
    active: RwLock<Option<u64>>,

    /// Last generation handed out.
    last: AtomicU64,
}

impl SessionGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and make it the only one allowed to publish.
    pub(crate) fn open(&self) -> u64 {
        let generation = self.last.fetch_add(1, Ordering::Relaxed) + 1;
        *self.active.write() = Some(generation);
        generation
    }

    /// Stop all publication. Waits for an in-progress publish to finish.
    pub(crate) fn close(&self) {
        *self.active.write() = None;
    }

    /// Run `f` only if `generation` is still open.
    ///
    /// `f` runs under the read lock and must not call back into the session.
    pub(crate) fn run_if_current<T>(&self, generation: u64, f: impl FnOnce() -> T) -> Option<T> {
        let active = self.active.read();
        if *active == Some(generation) {
            Some(f())
        } else {
            None
        }
    }
}
