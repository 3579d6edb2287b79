//! Scanning session orchestration.
//!
//! [`RegionSession`] wires a [`ReadingSource`] to the fingerprint reducer,
//! the transition tracker, a [`RegionResolver`] and a [`PresentationSink`],
//! and owns the session boundaries.
//!
//! # State Machine
//!
//! ```text
//!            start_scanning            stop_scanning
//!    Idle -----------------> Scanning ----------------> Idle
//!      |                        |
//!      | disconnect             | disconnect
//!      v                        v
//!   Disconnected  <-------------+       (terminal)
//! ```
//!
//! # Concurrency
//!
//! The source pushes batches into an unbounded channel and never waits. One
//! consumer task per scanning session drains that channel in order, so the
//! tracker has exactly one writer. Every sink publication goes through a
//! generation gate: once `stop_scanning` returns, results still in flight
//! from the stopped session are discarded instead of shown.
//!
//! Sinks must not call back into the session from `show_region` or
//! `show_points_of_interest`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use beaconregion::resolver::RegionCatalog;
//! use beaconregion::session::RegionSession;
//! use beaconregion::sink::RecordingSink;
//! use beaconregion::source::ChannelSource;
//!
//! let source = Arc::new(ChannelSource::new());
//! let session = RegionSession::new(
//!     source.clone(),
//!     Arc::new(RegionCatalog::new()),
//!     Arc::new(RecordingSink::new()),
//!     tokio::runtime::Handle::current(),
//! );
//!
//! session.start_scanning()?;
//! source.on_batch(batch);
//! session.stop_scanning();
//! session.disconnect();
//! ```

mod config;
mod error;
mod gate;
mod processor;

pub use config::{ParseResolutionModeError, ResolutionMode, SessionConfig};
pub use error::SessionError;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::fingerprint::RegionFingerprint;
use crate::resolver::RegionResolver;
use crate::sink::PresentationSink;
use crate::source::ReadingSource;
use crate::telemetry::{SessionMetrics, TelemetrySnapshot};
use crate::tracker::RegionTransitionTracker;

use gate::SessionGate;
use processor::BatchProcessor;

/// Lifecycle state of a [`RegionSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not scanning; batches are not consumed.
    Idle,
    /// Consuming batches from the reading source.
    Scanning,
    /// Source connection released. Terminal.
    Disconnected,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Scanning => write!(f, "scanning"),
            SessionState::Disconnected => write!(f, "disconnected"),
        }
    }
}

struct SessionInner {
    state: SessionState,
    cancellation: Option<CancellationToken>,
    /// Consumer of the most recent scanning session.
    task: Option<JoinHandle<()>>,
}

/// Drives region detection for one reading source.
pub struct RegionSession {
    source: Arc<dyn ReadingSource>,
    resolver: Arc<dyn RegionResolver>,
    sink: Arc<dyn PresentationSink>,
    tracker: Arc<Mutex<RegionTransitionTracker>>,
    metrics: Arc<SessionMetrics>,
    gate: Arc<SessionGate>,
    config: SessionConfig,
    runtime: Handle,
    inner: Mutex<SessionInner>,
}

impl RegionSession {
    /// Create an idle session with default configuration.
    ///
    /// Consumer tasks are spawned on `runtime`.
    pub fn new(
        source: Arc<dyn ReadingSource>,
        resolver: Arc<dyn RegionResolver>,
        sink: Arc<dyn PresentationSink>,
        runtime: Handle,
    ) -> Self {
        Self {
            source,
            resolver,
            sink,
            tracker: Arc::new(Mutex::new(RegionTransitionTracker::new())),
            metrics: Arc::new(SessionMetrics::new()),
            gate: Arc::new(SessionGate::new()),
            config: SessionConfig::default(),
            runtime,
            inner: Mutex::new(SessionInner {
                state: SessionState::Idle,
                cancellation: None,
                task: None,
            }),
        }
    }

    /// Replace the session configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Begin consuming batches from the reading source.
    ///
    /// Forgets the previously known region, so the first region of the new
    /// session is always reported as a transition. Does nothing if already
    /// scanning.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Disconnected`] after [`disconnect`](Self::disconnect)
    /// - [`SessionError::Source`] if the source refuses the subscription
    pub fn start_scanning(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        match inner.state {
            SessionState::Disconnected => return Err(SessionError::Disconnected),
            SessionState::Scanning => {
                debug!("Already scanning");
                return Ok(());
            }
            SessionState::Idle => {}
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.source.subscribe(tx)?;

        self.tracker.lock().reset();
        let generation = self.gate.open();
        let cancellation = CancellationToken::new();

        let processor = BatchProcessor {
            generation,
            gate: Arc::clone(&self.gate),
            tracker: Arc::clone(&self.tracker),
            resolver: Arc::clone(&self.resolver),
            sink: Arc::clone(&self.sink),
            metrics: Arc::clone(&self.metrics),
            resolution: self.config.resolution,
        };
        let task = self.runtime.spawn(processor.run(rx, cancellation.clone()));

        inner.state = SessionState::Scanning;
        inner.cancellation = Some(cancellation);
        inner.task = Some(task);

        info!(
            generation,
            resolution = %self.config.resolution,
            "Scanning started"
        );
        Ok(())
    }

    /// Stop consuming batches.
    ///
    /// Batches still queued are not processed, and lookups already in flight
    /// are discarded when they complete. The last known region is kept until
    /// the next [`start_scanning`](Self::start_scanning). Does nothing unless
    /// scanning.
    pub fn stop_scanning(&self) {
        let mut inner = self.inner.lock();
        self.stop_locked(&mut inner);
    }

    /// Release the reading source. Terminal and idempotent.
    ///
    /// Stopping and disconnecting happen under one lock, so no scanning
    /// session can start in between.
    pub fn disconnect(&self) {
        let mut inner = self.inner.lock();
        if inner.state == SessionState::Disconnected {
            return;
        }
        self.stop_locked(&mut inner);
        self.source.disconnect();
        inner.state = SessionState::Disconnected;

        info!("Reading source disconnected");
    }

    fn stop_locked(&self, inner: &mut SessionInner) {
        if inner.state != SessionState::Scanning {
            debug!(state = %inner.state, "Stop requested while not scanning");
            return;
        }

        self.source.unsubscribe();
        self.gate.close();
        if let Some(cancellation) = inner.cancellation.take() {
            cancellation.cancel();
        }
        inner.state = SessionState::Idle;

        info!("Scanning stopped");
    }

    /// Wait for the most recent consumer task to finish.
    ///
    /// The task ends when scanning stops or the source ends its stream.
    pub async fn join(&self) {
        let task = self.inner.lock().task.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!(error = %e, "Batch consumer ended abnormally");
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// Last region observed in the current or most recent session.
    pub fn last_region(&self) -> Option<RegionFingerprint> {
        self.tracker.lock().last_region().cloned()
    }

    /// Point-in-time copy of the session counters.
    pub fn metrics(&self) -> TelemetrySnapshot {
        self.metrics.snapshot()
    }

    /// Active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl fmt::Debug for RegionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionSession")
            .field("state", &self.state())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Drop for RegionSession {
    fn drop(&mut self) {
        self.gate.close();
        let inner = self.inner.get_mut();
        if let Some(cancellation) = inner.cancellation.take() {
            cancellation.cancel();
        }
    }
}
