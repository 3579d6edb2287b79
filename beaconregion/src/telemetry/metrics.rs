use std::sync::atomic::{AtomicU64, Ordering};

use super::TelemetrySnapshot;

/// Atomic counters describing what a session has done.
///
/// Counters accumulate across scanning sessions; they are never reset by
/// `start_scanning`.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    batches_received: AtomicU64,
    batches_insufficient: AtomicU64,
    regions_published: AtomicU64,
    transitions: AtomicU64,
    poi_lists_shown: AtomicU64,
    poi_clears: AtomicU64,
    stale_discarded: AtomicU64,
    resolver_failures: AtomicU64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch arrived from the reading source.
    pub fn batch_received(&self) {
        self.batches_received.fetch_add(1, Ordering::Relaxed);
    }

    /// A batch had too few sightings to name a region.
    pub fn batch_insufficient(&self) {
        self.batches_insufficient.fetch_add(1, Ordering::Relaxed);
    }

    /// A region label reached the sink.
    pub fn region_published(&self) {
        self.regions_published.fetch_add(1, Ordering::Relaxed);
    }

    /// The tracker reported a region change.
    pub fn transition(&self) {
        self.transitions.fetch_add(1, Ordering::Relaxed);
    }

    /// A POI list reached the sink.
    pub fn poi_shown(&self) {
        self.poi_lists_shown.fetch_add(1, Ordering::Relaxed);
    }

    /// A POI clear reached the sink.
    pub fn poi_cleared(&self) {
        self.poi_clears.fetch_add(1, Ordering::Relaxed);
    }

    /// A resolution finished after its session ended and was dropped.
    pub fn stale_discarded(&self) {
        self.stale_discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// An offloaded resolver call panicked or was cancelled.
    pub fn resolver_failure(&self) {
        self.resolver_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            batches_received: self.batches_received.load(Ordering::Relaxed),
            batches_insufficient: self.batches_insufficient.load(Ordering::Relaxed),
            regions_published: self.regions_published.load(Ordering::Relaxed),
            transitions: self.transitions.load(Ordering::Relaxed),
            poi_lists_shown: self.poi_lists_shown.load(Ordering::Relaxed),
            poi_clears: self.poi_clears.load(Ordering::Relaxed),
            stale_discarded: self.stale_discarded.load(Ordering::Relaxed),
            resolver_failures: self.resolver_failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let snapshot = SessionMetrics::new().snapshot();
        assert_eq!(snapshot, TelemetrySnapshot::default());
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = SessionMetrics::new();
        metrics.batch_received();
        metrics.batch_received();
        metrics.batch_insufficient();
        metrics.transition();
        metrics.poi_shown();
        metrics.poi_cleared();
        metrics.stale_discarded();
        metrics.resolver_failure();

        let s = metrics.snapshot();
        assert_eq!(s.batches_received, 2);
        assert_eq!(s.batches_insufficient, 1);
        assert_eq!(s.transitions, 1);
        assert_eq!(s.poi_lists_shown, 1);
        assert_eq!(s.poi_clears, 1);
        assert_eq!(s.stale_discarded, 1);
        assert_eq!(s.resolver_failures, 1);
    }
}
