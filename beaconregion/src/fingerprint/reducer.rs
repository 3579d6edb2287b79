//! Reduction of one observation batch to a region fingerprint.

use std::cmp::Ordering;

use super::RegionFingerprint;
use crate::observation::{Observation, ObservationBatch};

/// Minimum sightings a batch needs before a region can be named.
pub const MIN_OBSERVATIONS: usize = 2;

/// Ranking used to pick the strongest sightings.
///
/// Stronger signal first; equal signals fall back to the beacon id so the
/// outcome never depends on delivery order.
fn by_strength(a: &Observation, b: &Observation) -> Ordering {
    b.rssi
        .cmp(&a.rssi)
        .then_with(|| a.beacon_id.cmp(&b.beacon_id))
}

/// Select the two strongest sightings of a batch.
///
/// Returns `None` when the batch has fewer than [`MIN_OBSERVATIONS`]
/// sightings. Duplicate identifiers are kept as-is.
pub fn strongest_pair(batch: &ObservationBatch) -> Option<(&Observation, &Observation)> {
    if batch.len() < MIN_OBSERVATIONS {
        return None;
    }

    let mut best: Option<&Observation> = None;
    let mut runner_up: Option<&Observation> = None;

    for obs in batch {
        match best {
            Some(b) if by_strength(obs, b) != Ordering::Less => {
                if runner_up.map_or(true, |r| by_strength(obs, r) == Ordering::Less) {
                    runner_up = Some(obs);
                }
            }
            _ => {
                runner_up = best;
                best = Some(obs);
            }
        }
    }

    best.zip(runner_up)
}

/// Reduce a batch to the fingerprint of the region it points at.
///
/// Pure and total: a batch with fewer than two sightings yields `None`,
/// anything else yields the canonical combination of the two strongest
/// beacon ids.
pub fn reduce(batch: &ObservationBatch) -> Option<RegionFingerprint> {
    let (strongest, second) = strongest_pair(batch)?;
    Some(RegionFingerprint::combine(
        strongest.beacon_id.clone(),
        second.beacon_id.clone(),
    ))
}
