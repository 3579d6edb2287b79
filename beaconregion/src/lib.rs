//! BeaconRegion - indoor region tracking from proximity beacons
//!
//! This library turns a noisy stream of beacon sightings into a stable notion
//! of which region of a building the user is in, and reports region changes.
//!
//! # Pipeline
//!
//! ```text
//! ReadingSource ──► fingerprint::reduce ──► RegionTransitionTracker
//!                                │                    │
//!                                ▼ every batch        ▼ transitions only
//!                     resolve_label ──► sink   resolve_points_of_interest ──► sink
//! ```
//!
//! # Modules
//!
//! - [`observation`] - beacon sightings and batches
//! - [`fingerprint`] - reduction of a batch to a region fingerprint
//! - [`tracker`] - region transition detection
//! - [`resolver`] - region label / point-of-interest lookup
//! - [`sink`] - presentation of region updates
//! - [`source`] - interface to the radio stack
//! - [`session`] - start/stop/disconnect orchestration
//! - [`telemetry`] - session counters
//! - [`config`] - INI configuration file
//! - [`logging`] - `tracing` subscriber setup

pub mod config;
pub mod fingerprint;
pub mod logging;
pub mod observation;
pub mod resolver;
pub mod session;
pub mod sink;
pub mod source;
pub mod telemetry;
pub mod tracker;

pub use fingerprint::{reduce, RegionFingerprint};
pub use observation::{BeaconId, Observation, ObservationBatch};
pub use resolver::{RegionCatalog, RegionResolver};
pub use session::{RegionSession, SessionConfig, SessionError, SessionState};
pub use sink::PresentationSink;
pub use source::{ChannelSource, ReadingSource};
pub use tracker::{RegionTransitionTracker, Transition};
