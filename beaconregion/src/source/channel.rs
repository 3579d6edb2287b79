//! Push-driven reading source.

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use super::{ReadingSource, SourceError};
use crate::observation::ObservationBatch;

#[derive(Debug, Default)]
struct ChannelSourceInner {
    subscriber: Option<UnboundedSender<ObservationBatch>>,
    disconnected: bool,
}

/// Reading source fed by explicit [`on_batch`](ChannelSource::on_batch) calls.
///
/// Adapters for real radio stacks call `on_batch` from their scan callback;
/// replay tools and tests call it directly. Batches delivered while nobody is
/// subscribed are dropped.
#[derive(Debug, Default)]
pub struct ChannelSource {
    inner: Mutex<ChannelSourceInner>,
}

impl ChannelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a batch to the current subscriber.
    ///
    /// Returns `true` if the batch was queued for processing.
    pub fn on_batch(&self, batch: ObservationBatch) -> bool {
        let mut inner = self.inner.lock();
        let Some(subscriber) = inner.subscriber.as_ref() else {
            tracing::trace!(observations = batch.len(), "No subscriber, batch dropped");
            return false;
        };

        if subscriber.send(batch).is_err() {
            tracing::debug!("Subscriber gone, dropping subscription");
            inner.subscriber = None;
            return false;
        }
        true
    }

    /// End the current subscription's stream.
    ///
    /// Batches already queued are still processed; the consumer then sees
    /// end-of-stream.
    pub fn close_stream(&self) {
        self.inner.lock().subscriber = None;
    }

    /// Whether a subscriber is currently attached.
    pub fn is_subscribed(&self) -> bool {
        self.inner.lock().subscriber.is_some()
    }

    /// Whether [`disconnect`](ReadingSource::disconnect) has been called.
    pub fn is_disconnected(&self) -> bool {
        self.inner.lock().disconnected
    }
}

impl ReadingSource for ChannelSource {
    fn subscribe(&self, subscriber: UnboundedSender<ObservationBatch>) -> Result<(), SourceError> {
        let mut inner = self.inner.lock();
        if inner.disconnected {
            return Err(SourceError::Disconnected);
        }
        inner.subscriber = Some(subscriber);
        tracing::debug!("Reading source subscribed");
        Ok(())
    }

    fn unsubscribe(&self) {
        if self.inner.lock().subscriber.take().is_some() {
            tracing::debug!("Reading source unsubscribed");
        }
    }

    fn disconnect(&self) {
        let mut inner = self.inner.lock();
        inner.subscriber = None;
        if !inner.disconnected {
            inner.disconnected = true;
            tracing::debug!("Reading source disconnected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;
    use tokio::sync::mpsc;

    fn batch() -> ObservationBatch {
        vec![Observation::new("b1", -40), Observation::new("b2", -50)].into()
    }

    #[test]
    fn test_drops_without_subscriber() {
        let source = ChannelSource::new();
        assert!(!source.on_batch(batch()));
    }

    #[test]
    fn test_delivers_to_subscriber() {
        let source = ChannelSource::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        source.subscribe(tx).unwrap();

        assert!(source.on_batch(batch()));
        assert_eq!(rx.try_recv().unwrap(), batch());
    }

    #[test]
    fn test_close_stream_ends_channel() {
        let source = ChannelSource::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        source.subscribe(tx).unwrap();
        source.on_batch(batch());
        source.close_stream();

        assert!(rx.try_recv().is_ok());
        assert_eq!(
            rx.try_recv().unwrap_err(),
            mpsc::error::TryRecvError::Disconnected
        );
    }

    #[test]
    fn test_subscribe_after_disconnect_fails() {
        let source = ChannelSource::new();
        source.disconnect();
        source.disconnect();

        let (tx, _rx) = mpsc::unbounded_channel();
        assert_eq!(source.subscribe(tx), Err(SourceError::Disconnected));
        assert!(source.is_disconnected());
    }

    #[test]
    fn test_dropped_receiver_clears_subscription() {
        let source = ChannelSource::new();
        let (tx, rx) = mpsc::unbounded_channel();
        source.subscribe(tx).unwrap();
        drop(rx);

        assert!(!source.on_batch(batch()));
        assert!(!source.is_subscribed());
    }
}
