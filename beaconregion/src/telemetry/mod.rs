//! Session telemetry for observability and user feedback.
//!
//! Counters are lock-free atomics bumped from the session's consumer task.
//! Views take a [`TelemetrySnapshot`], a point-in-time copy, rather than
//! reading counters one by one.
//!
//! ```text
//! RegionSession ─────► SessionMetrics ─────► TelemetrySnapshot ─────► Views
//!                      (atomic counters)     (point-in-time copy)      (CLI, etc.)
//! ```
//!
//! # Example
//!
//! ```
//! use beaconregion::telemetry::SessionMetrics;
//!
//! let metrics = SessionMetrics::new();
//! metrics.batch_received();
//! metrics.region_published();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.batches_received, 1);
//! ```

mod metrics;
mod snapshot;

pub use metrics::SessionMetrics;
pub use snapshot::TelemetrySnapshot;
