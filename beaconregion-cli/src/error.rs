//! CLI error type.

use std::path::PathBuf;

use beaconregion::config::ConfigError;
use beaconregion::logging::LoggingError;
use beaconregion::resolver::CatalogError;
use beaconregion::session::SessionError;
use thiserror::Error;

/// Everything a CLI command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error("Failed to load region catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid batch on line {line}: {source}")]
    Batch {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid observation '{0}', expected <beacon_id>:<rssi>")]
    Observation(String),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
