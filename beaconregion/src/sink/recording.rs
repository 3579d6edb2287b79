//! Sink that records every update in memory.

use parking_lot::Mutex;

use super::PresentationSink;

/// A single update received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    /// `show_region` with the given label.
    Region(String),
    /// `show_points_of_interest` with a list.
    PointsOfInterest(Vec<String>),
    /// `show_points_of_interest(None)`.
    ClearPointsOfInterest,
}

/// Headless sink that keeps an ordered log of updates.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All updates received so far, in order.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    /// Labels passed to `show_region`, in order.
    pub fn regions(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Region(label) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of `show_points_of_interest` calls, clears included.
    pub fn poi_updates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| !matches!(call, SinkCall::Region(_)))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl PresentationSink for RecordingSink {
    fn show_region(&self, label: &str) {
        self.calls.lock().push(SinkCall::Region(label.to_string()));
    }

    fn show_points_of_interest(&self, points: Option<&[String]>) {
        let call = match points {
            Some(points) => SinkCall::PointsOfInterest(points.to_vec()),
            None => SinkCall::ClearPointsOfInterest,
        };
        self.calls.lock().push(call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let sink = RecordingSink::new();
        sink.show_region("A");
        sink.show_points_of_interest(Some(&["x".to_string()]));
        sink.show_region("A");
        sink.show_points_of_interest(Some(&[]));

        assert_eq!(sink.regions(), vec!["A", "A"]);
        assert_eq!(sink.poi_updates(), 2);
        assert_eq!(sink.calls()[3], SinkCall::PointsOfInterest(vec![]));

        sink.clear();
        assert!(sink.calls().is_empty());
    }
}
