//! Presentation of region updates.
//!
//! The core reports two kinds of updates through [`PresentationSink`]:
//!
//! - `show_region` on every batch that names a region
//! - `show_points_of_interest` only when the region changes, where `None`
//!   is an explicit request to clear whatever list is on screen
//!
//! Rendering is entirely the sink's business. A sink that may disappear
//! before the session ends (a closed window, a detached view) should be
//! wrapped in [`WeakSink`], which drops updates once its target is gone.

mod recording;
mod weak;

pub use recording::{RecordingSink, SinkCall};
pub use weak::WeakSink;

/// Receiver of region and point-of-interest updates.
///
/// Calls arrive from the session's consumer task and should return quickly.
pub trait PresentationSink: Send + Sync {
    /// Display the label of the region the user is in.
    fn show_region(&self, label: &str);

    /// Display the points of interest of a newly entered region.
    ///
    /// `None` means the region has no POI data and any previously shown list
    /// must be cleared.
    fn show_points_of_interest(&self, points: Option<&[String]>);
}
