//! Interface to the radio stack that reports beacon sightings.
//!
//! A [`ReadingSource`] pushes [`ObservationBatch`]es into a channel handed to
//! it by the session. Delivery is fire-and-forget: the source never waits
//! for a batch to be processed, so a slow consumer cannot stall the radio
//! callback.
//!
//! ```text
//! Radio stack ──► ReadingSource ──(unbounded mpsc)──► RegionSession consumer
//! ```

mod channel;

pub use channel::ChannelSource;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::observation::ObservationBatch;

/// Errors reported by a reading source.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The underlying radio connection has been released.
    #[error("Reading source is disconnected")]
    Disconnected,
}

/// Producer of observation batches.
pub trait ReadingSource: Send + Sync {
    /// Start delivering batches to `subscriber`.
    ///
    /// Replaces any previous subscriber.
    fn subscribe(&self, subscriber: UnboundedSender<ObservationBatch>) -> Result<(), SourceError>;

    /// Stop delivering batches.
    fn unsubscribe(&self);

    /// Release the underlying connection. No batches are delivered
    /// afterwards. Calling it more than once is harmless.
    fn disconnect(&self);
}
