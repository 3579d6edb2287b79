//! `fingerprint` command: reduce a single batch given on the command line.

use beaconregion::fingerprint::{reduce, MIN_OBSERVATIONS};
use beaconregion::observation::{Observation, ObservationBatch};
use console::style;

use crate::error::CliError;

/// Parse `<beacon_id>:<rssi>`.
///
/// Splits on the last colon so MAC-style identifiers such as
/// `AA:BB:CC:DD:EE:FF:-60` parse as expected.
pub fn parse_observation(arg: &str) -> Result<Observation, CliError> {
    let (id, rssi) = arg
        .rsplit_once(':')
        .ok_or_else(|| CliError::Observation(arg.to_string()))?;
    if id.is_empty() {
        return Err(CliError::Observation(arg.to_string()));
    }
    let rssi: i32 = rssi
        .trim()
        .parse()
        .map_err(|_| CliError::Observation(arg.to_string()))?;
    Ok(Observation::new(id, rssi))
}

/// Print the fingerprint of the given observations.
pub fn run(observations: &[String]) -> Result<(), CliError> {
    let batch: ObservationBatch = observations
        .iter()
        .map(|arg| parse_observation(arg))
        .collect::<Result<_, _>>()?;

    match reduce(&batch) {
        Some(fingerprint) => {
            println!("{}", style(&fingerprint).bold());
            if fingerprint.is_degenerate() {
                println!(
                    "{}",
                    style("note: both strongest sightings come from the same beacon").dim()
                );
            }
        }
        None => println!(
            "Insufficient signal: {} observation(s), at least {} needed",
            batch.len(),
            MIN_OBSERVATIONS
        ),
    }

    Ok(())
}
