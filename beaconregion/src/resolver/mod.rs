//! Lookup of region labels and points of interest.
//!
//! The core never owns region data. It consumes it through
//! [`RegionResolver`], a pair of total lookups: every fingerprint has a label
//! (possibly an "unknown region" placeholder), and points of interest are
//! either present or explicitly absent.
//!
//! [`RegionCatalog`] is the bundled in-memory implementation, loaded from a
//! JSON catalog file.

mod catalog;

pub use catalog::{CatalogError, RegionCatalog, RegionEntry, DEFAULT_UNKNOWN_LABEL};

use crate::fingerprint::RegionFingerprint;

/// Source of human-readable region data.
///
/// Both lookups are expected to be cheap. Implementations that hit a slow
/// store should be paired with
/// [`ResolutionMode::Blocking`](crate::session::ResolutionMode::Blocking) so
/// lookups run off the batch-processing task.
pub trait RegionResolver: Send + Sync {
    /// Label shown for a region. Must not fail; unknown regions get a
    /// placeholder label.
    fn resolve_label(&self, fingerprint: &RegionFingerprint) -> String;

    /// Points of interest for a region.
    ///
    /// `None` means the region has no POI data, which is not the same as an
    /// empty list.
    fn resolve_points_of_interest(&self, fingerprint: &RegionFingerprint) -> Option<Vec<String>>;
}
