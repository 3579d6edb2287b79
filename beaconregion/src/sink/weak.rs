//! Sink wrapper that tolerates its target going away.

use std::sync::{Arc, Weak};

use super::PresentationSink;

/// Forwards updates to a sink held by weak reference.
///
/// Once the target has been dropped, updates are silently discarded.
pub struct WeakSink {
    target: Weak<dyn PresentationSink>,
}

impl WeakSink {
    /// Wrap a sink without keeping it alive.
    pub fn new(target: &Arc<dyn PresentationSink>) -> Self {
        Self {
            target: Arc::downgrade(target),
        }
    }

    /// Whether the target sink still exists.
    pub fn is_available(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl std::fmt::Debug for WeakSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakSink")
            .field("available", &self.is_available())
            .finish()
    }
}

impl PresentationSink for WeakSink {
    fn show_region(&self, label: &str) {
        match self.target.upgrade() {
            Some(sink) => sink.show_region(label),
            None => tracing::trace!(label, "Sink unavailable, region update dropped"),
        }
    }

    fn show_points_of_interest(&self, points: Option<&[String]>) {
        match self.target.upgrade() {
            Some(sink) => sink.show_points_of_interest(points),
            None => tracing::trace!("Sink unavailable, POI update dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkCall};

    #[test]
    fn test_forwards_while_target_alive() {
        let recorder = Arc::new(RecordingSink::new());
        let target: Arc<dyn PresentationSink> = recorder.clone();
        let weak = WeakSink::new(&target);

        weak.show_region("Lobby");
        weak.show_points_of_interest(None);

        assert!(weak.is_available());
        assert_eq!(
            recorder.calls(),
            vec![SinkCall::Region("Lobby".into()), SinkCall::ClearPointsOfInterest]
        );
    }

    #[test]
    fn test_drops_after_target_gone() {
        let target: Arc<dyn PresentationSink> = Arc::new(RecordingSink::new());
        let weak = WeakSink::new(&target);
        drop(target);

        assert!(!weak.is_available());
        // Must not panic.
        weak.show_region("Lobby");
        weak.show_points_of_interest(Some(&["Cafe".to_string()]));
    }
}
