//! Beacon sightings as delivered by the radio stack.
//!
//! Types here are the raw, ephemeral input to the core. Nothing is retained
//! beyond the batch being processed, and nothing is validated: a batch may be
//! empty, may contain a single sighting, or may list the same beacon twice.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier broadcast by a fixed-position beacon.
///
/// Identifiers are totally ordered so that tie-breaks and the canonical
/// region combine are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeaconId(String);

impl BeaconId {
    /// Create a beacon identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BeaconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BeaconId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BeaconId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single sighting: which beacon, and how strong its signal was.
///
/// `rssi` is on the dBm scale, so larger (less negative) means closer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Identifier of the beacon that was heard.
    pub beacon_id: BeaconId,
    /// Received signal strength in dBm.
    pub rssi: i32,
}

impl Observation {
    /// Create a new observation.
    pub fn new(beacon_id: impl Into<BeaconId>, rssi: i32) -> Self {
        Self {
            beacon_id: beacon_id.into(),
            rssi,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}dBm", self.beacon_id, self.rssi)
    }
}

/// Unordered set of sightings captured at one refresh of the radio stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationBatch {
    observations: Vec<Observation>,
}

impl ObservationBatch {
    /// Create a batch from a list of observations.
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Number of sightings in the batch, duplicates included.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the batch carries no sightings at all.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterate over the sightings in delivery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Borrow the sightings as a slice.
    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct beacon identifiers present in the batch, sorted.
    pub fn unique_beacons(&self) -> BTreeSet<&BeaconId> {
        self.observations.iter().map(|o| &o.beacon_id).collect()
    }
}

impl From<Vec<Observation>> for ObservationBatch {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

impl FromIterator<Observation> for ObservationBatch {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObservationBatch {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
