//! Region fingerprints derived from the two strongest beacons.
//!
//! A building is carved into coarse regions, each identified by the pair of
//! beacons that dominate the radio picture there. The fingerprint is the
//! canonical (order-independent) combination of that pair: which of the two
//! happened to be louder in a given batch never changes the region.
//!
//! # Example
//!
//! ```
//! use beaconregion::fingerprint::reduce;
//! use beaconregion::observation::{Observation, ObservationBatch};
//!
//! let batch: ObservationBatch = vec![
//!     Observation::new("b1", -40),
//!     Observation::new("b2", -55),
//!     Observation::new("b3", -80),
//! ]
//! .into();
//!
//! let fingerprint = reduce(&batch).unwrap();
//! assert_eq!(fingerprint.to_string(), "b1+b2");
//! ```

mod reducer;

pub use reducer::{reduce, strongest_pair, MIN_OBSERVATIONS};

use std::fmt;

use crate::observation::BeaconId;

/// Canonical identifier of a region: an unordered pair of beacon ids.
///
/// Invariant: `first <= second`. The only way to build one is
/// [`RegionFingerprint::combine`], which sorts its arguments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionFingerprint {
    first: BeaconId,
    second: BeaconId,
}

impl RegionFingerprint {
    /// Combine two beacon identifiers into a fingerprint.
    ///
    /// `combine(a, b) == combine(b, a)` for all `a`, `b`.
    pub fn combine(a: BeaconId, b: BeaconId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The lexicographically smaller beacon of the pair.
    pub fn first(&self) -> &BeaconId {
        &self.first
    }

    /// The lexicographically larger beacon of the pair.
    pub fn second(&self) -> &BeaconId {
        &self.second
    }

    /// Whether both halves name the same beacon.
    ///
    /// Happens when a batch reports one beacon twice above everything else.
    pub fn is_degenerate(&self) -> bool {
        self.first == self.second
    }
}

impl fmt::Display for RegionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_is_commutative() {
        let ab = RegionFingerprint::combine("a".into(), "b".into());
        let ba = RegionFingerprint::combine("b".into(), "a".into());
        assert_eq!(ab, ba);
        assert_eq!(ab.first().as_str(), "a");
        assert_eq!(ab.second().as_str(), "b");
    }

    #[test]
    fn test_degenerate_fingerprint() {
        let fp = RegionFingerprint::combine("b1".into(), "b1".into());
        assert!(fp.is_degenerate());
        assert_eq!(fp.to_string(), "b1+b1");
    }

    #[test]
    fn test_display() {
        let fp = RegionFingerprint::combine("zeta".into(), "alpha".into());
        assert_eq!(fp.to_string(), "alpha+zeta");
    }
}
