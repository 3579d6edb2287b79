//! Region transition detection.
//!
//! The tracker remembers the last region fingerprint seen during the current
//! scanning session and decides whether a new fingerprint is a move into a
//! different region.
//!
//! # Lifecycle
//!
//! ```text
//!            observe(A)            observe(B)
//!   None ---------------> Some(A) ------------> Some(B)
//!     ^                      |                     |
//!     |        reset()       |       reset()       |
//!     +----------------------+---------------------+
//! ```
//!
//! The very first fingerprint after construction or [`reset`] is always a
//! transition. The tracker is a plain `&mut self` state machine; the session
//! owns it behind a single lock and drives it from one consumer.
//!
//! [`reset`]: RegionTransitionTracker::reset

use crate::fingerprint::RegionFingerprint;

/// Outcome of feeding one fingerprint to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Whether the fingerprint differs from the previously known region.
    pub is_transition: bool,

    /// Region known before this observation, if any.
    pub previous: Option<RegionFingerprint>,
}

/// Stateful detector of region changes within one scanning session.
#[derive(Debug, Default)]
pub struct RegionTransitionTracker {
    /// Last region observed this session.
    last_region: Option<RegionFingerprint>,

    /// Transitions reported since construction.
    transitions: u64,
}

impl RegionTransitionTracker {
    /// Create a tracker with no known region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fingerprint and report whether it is a region change.
    ///
    /// The stored region is replaced unconditionally.
    pub fn observe(&mut self, fingerprint: RegionFingerprint) -> Transition {
        let is_transition = self.last_region.as_ref() != Some(&fingerprint);

        if is_transition {
            self.transitions += 1;
            tracing::info!(
                from = %self
                    .last_region
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ToString::to_string),
                to = %fingerprint,
                "Region transition"
            );
        }

        let previous = self.last_region.replace(fingerprint);
        Transition {
            is_transition,
            previous,
        }
    }

    /// Forget the last known region.
    ///
    /// Must be called at every session boundary so region state from an
    /// earlier session never leaks into the next one.
    pub fn reset(&mut self) {
        if self.last_region.take().is_some() {
            tracing::debug!("Region tracker reset");
        }
    }

    /// Last region observed, if any.
    pub fn last_region(&self) -> Option<&RegionFingerprint> {
        self.last_region.as_ref()
    }

    /// Number of transitions reported since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}
