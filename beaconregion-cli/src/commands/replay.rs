//! `replay` command: feed recorded batches through a live session.
//!
//! Each non-empty line of the input is one batch, written as a JSON array of
//! observations:
//!
//! ```text
//! [{"beacon_id": "b1", "rssi": -40}, {"beacon_id": "b2", "rssi": -55}]
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use beaconregion::config::ConfigFile;
use beaconregion::observation::ObservationBatch;
use beaconregion::resolver::{RegionCatalog, DEFAULT_UNKNOWN_LABEL};
use beaconregion::session::{RegionSession, ResolutionMode};
use beaconregion::sink::PresentationSink;
use beaconregion::source::ChannelSource;
use clap::Args;
use console::style;
use tokio::runtime::Handle;
use tracing::info;

use crate::error::CliError;

/// Arguments for `replay`.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// File with one JSON array of observations per line
    pub batches: PathBuf,

    /// Region catalog (JSON); overrides catalog.path from the config file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Delay between batches in milliseconds
    #[arg(long, default_value_t = 0)]
    pub interval_ms: u64,

    /// Run resolver lookups on the blocking thread pool
    #[arg(long)]
    pub blocking: bool,
}

/// Prints region updates to stdout.
struct ConsoleSink;

/// Lines printed for a point-of-interest update.
///
/// `None` clears the previous list; an empty list is a region known to have
/// nothing of interest.
fn render_points_of_interest(points: Option<&[String]>) -> Vec<String> {
    match points {
        None => vec![format!("  {}", style("(points of interest cleared)").dim())],
        Some([]) => vec![format!("  {}", style("(no points of interest here)").dim())],
        Some(points) => points
            .iter()
            .map(|point| format!("  {} {}", style("•").cyan(), point))
            .collect(),
    }
}

impl PresentationSink for ConsoleSink {
    fn show_region(&self, label: &str) {
        println!("{} {}", style("Current Region Detected:").bold(), label);
    }

    fn show_points_of_interest(&self, points: Option<&[String]>) {
        for line in render_points_of_interest(points) {
            println!("{}", line);
        }
    }
}

/// Parse newline-delimited batches. Blank lines are skipped.
pub fn parse_batches(text: &str) -> Result<Vec<ObservationBatch>, CliError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| CliError::Batch {
                line: index + 1,
                source,
            })
        })
        .collect()
}

fn load_catalog(path: Option<&Path>, config: &ConfigFile) -> Result<RegionCatalog, CliError> {
    let catalog = match path {
        Some(path) => RegionCatalog::load(path)?,
        None => RegionCatalog::new(),
    };

    // A label set in the catalog file wins over the config file.
    if catalog.unknown_label() == DEFAULT_UNKNOWN_LABEL {
        Ok(catalog.with_unknown_label(config.catalog.unknown_label.clone()))
    } else {
        Ok(catalog)
    }
}

/// Run the replay to completion and print the session counters.
pub fn run(args: ReplayArgs, config: &ConfigFile) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&args.batches).map_err(|source| CliError::Io {
        path: args.batches.clone(),
        source,
    })?;
    let batches = parse_batches(&text)?;

    let catalog_path = args.catalog.as_deref().or(config.catalog.path.as_deref());
    let catalog = load_catalog(catalog_path, config)?;
    info!(
        batches = batches.len(),
        regions = catalog.len(),
        "Replay loaded"
    );

    let mut session_config = config.session_config();
    if args.blocking {
        session_config = session_config.with_resolution(ResolutionMode::Blocking);
    }

    let interval = Duration::from_millis(args.interval_ms);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(async move {
        let source = Arc::new(ChannelSource::new());
        let session = RegionSession::new(
            source.clone(),
            Arc::new(catalog),
            Arc::new(ConsoleSink),
            Handle::current(),
        )
        .with_config(session_config);

        session.start_scanning()?;

        for batch in batches {
            source.on_batch(batch);
            if !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        }

        source.close_stream();
        session.join().await;
        session.disconnect();

        println!();
        println!("{}", style("Session summary").bold());
        println!("{}", session.metrics());
        Ok::<(), CliError>(())
    })
}
