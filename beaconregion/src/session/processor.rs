//! Batch consumer: the single writer of tracker state.
//!
//! ```text
//! batch ──► reduce ──► None ──► skip
//!              │
//!              ▼ fingerprint
//!        resolve_label ──► [gate] show_region + tracker.observe
//!                                          │
//!                                          ▼ transition?
//!                          resolve_points_of_interest ──► [gate] show_points_of_interest
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::config::ResolutionMode;
use super::gate::SessionGate;
use crate::fingerprint::{reduce, RegionFingerprint};
use crate::observation::ObservationBatch;
use crate::resolver::RegionResolver;
use crate::sink::PresentationSink;
use crate::telemetry::SessionMetrics;
use crate::tracker::RegionTransitionTracker;

/// Everything one scanning session's consumer needs.
pub(crate) struct BatchProcessor {
    pub(crate) generation: u64,
    pub(crate) gate: Arc<SessionGate>,
    pub(crate) tracker: Arc<Mutex<RegionTransitionTracker>>,
    pub(crate) resolver: Arc<dyn RegionResolver>,
    pub(crate) sink: Arc<dyn PresentationSink>,
    pub(crate) metrics: Arc<SessionMetrics>,
    pub(crate) resolution: ResolutionMode,
}

impl BatchProcessor {
    /// Drain batches in delivery order until cancelled or the stream ends.
    pub(crate) async fn run(
        self,
        mut batches: UnboundedReceiver<ObservationBatch>,
        cancellation: CancellationToken,
    ) {
        debug!(generation = self.generation, "Batch consumer started");

        loop {
            tokio::select! {
                biased;

                _ = cancellation.cancelled() => {
                    debug!(generation = self.generation, "Batch consumer cancelled");
                    break;
                }

                batch = batches.recv() => match batch {
                    Some(batch) => self.process(batch).await,
                    None => {
                        debug!(generation = self.generation, "Reading source stream ended");
                        break;
                    }
                },
            }
        }
    }

    async fn process(&self, batch: ObservationBatch) {
        self.metrics.batch_received();

        let Some(fingerprint) = reduce(&batch) else {
            self.metrics.batch_insufficient();
            trace!(observations = batch.len(), "Insufficient signal, batch skipped");
            return;
        };

        debug!(
            region = %fingerprint,
            beacons = batch.unique_beacons().len(),
            "Region scanned"
        );

        let label = self
            .resolve(&fingerprint, |resolver, fp| resolver.resolve_label(fp))
            .await;

        let transition = self.gate.run_if_current(self.generation, || {
            if let Some(label) = &label {
                self.sink.show_region(label);
            }
            self.tracker.lock().observe(fingerprint.clone())
        });

        let Some(transition) = transition else {
            self.metrics.stale_discarded();
            debug!(region = %fingerprint, "Session ended, region update discarded");
            return;
        };

        if label.is_some() {
            self.metrics.region_published();
        }

        if !transition.is_transition {
            return;
        }
        self.metrics.transition();

        let Some(points) = self
            .resolve(&fingerprint, |resolver, fp| {
                resolver.resolve_points_of_interest(fp)
            })
            .await
        else {
            return;
        };

        let published = self.gate.run_if_current(self.generation, || {
            self.sink.show_points_of_interest(points.as_deref());
        });

        match (published, &points) {
            (None, _) => {
                self.metrics.stale_discarded();
                debug!(region = %fingerprint, "Session ended, POI update discarded");
            }
            (Some(()), Some(points)) => {
                self.metrics.poi_shown();
                debug!(region = %fingerprint, count = points.len(), "Points of interest shown");
            }
            (Some(()), None) => {
                self.metrics.poi_cleared();
                debug!(region = %fingerprint, "No points of interest, display cleared");
            }
        }
    }

    /// Run one resolver lookup according to the resolution mode.
    ///
    /// Returns `None` only if an offloaded lookup panicked.
    async fn resolve<T, F>(&self, fingerprint: &RegionFingerprint, lookup: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn RegionResolver, &RegionFingerprint) -> T + Send + 'static,
    {
        match self.resolution {
            ResolutionMode::Inline => Some(lookup(self.resolver.as_ref(), fingerprint)),
            ResolutionMode::Blocking => {
                let resolver = Arc::clone(&self.resolver);
                let fingerprint = fingerprint.clone();
                match tokio::task::spawn_blocking(move || lookup(resolver.as_ref(), &fingerprint))
                    .await
                {
                    Ok(value) => Some(value),
                    Err(e) => {
                        self.metrics.resolver_failure();
                        warn!(error = %e, "Resolver lookup failed");
                        None
                    }
                }
            }
        }
    }
}
