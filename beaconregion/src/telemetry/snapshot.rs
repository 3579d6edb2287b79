use std::fmt;

/// Point-in-time copy of [`SessionMetrics`](super::SessionMetrics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Batches delivered by the reading source.
    pub batches_received: u64,
    /// Batches skipped because fewer than two beacons were heard.
    pub batches_insufficient: u64,
    /// Region labels sent to the sink.
    pub regions_published: u64,
    /// Region changes detected.
    pub transitions: u64,
    /// POI lists sent to the sink.
    pub poi_lists_shown: u64,
    /// POI clears sent to the sink.
    pub poi_clears: u64,
    /// Results dropped because their session had ended.
    pub stale_discarded: u64,
    /// Offloaded resolver calls that failed.
    pub resolver_failures: u64,
}

impl TelemetrySnapshot {
    /// Batches that named a region.
    pub fn batches_fingerprinted(&self) -> u64 {
        self.batches_received
            .saturating_sub(self.batches_insufficient)
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "batches: {} received, {} insufficient | regions: {} shown, {} transitions | \
             POI: {} lists, {} clears | {} stale, {} resolver failures",
            self.batches_received,
            self.batches_insufficient,
            self.regions_published,
            self.transitions,
            self.poi_lists_shown,
            self.poi_clears,
            self.stale_discarded,
            self.resolver_failures
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprinted_count() {
        let s = TelemetrySnapshot {
            batches_received: 10,
            batches_insufficient: 3,
            ..Default::default()
        };
        assert_eq!(s.batches_fingerprinted(), 7);
    }

    #[test]
    fn test_display_mentions_counts() {
        let s = TelemetrySnapshot {
            batches_received: 5,
            transitions: 2,
            ..Default::default()
        };
        let text = s.to_string();
        assert!(text.contains("5 received"));
        assert!(text.contains("2 transitions"));
    }
}
