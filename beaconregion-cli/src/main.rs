//! BeaconRegion CLI - Command-line interface
//!
//! Replays recorded beacon sightings through a region session, computes single
//! fingerprints, and manages the configuration file.

mod commands;
mod error;

use std::process::ExitCode;

use beaconregion::config::ConfigFile;
use beaconregion::logging::{init_logging, LoggingGuard};
use clap::{Parser, Subcommand};
use console::style;

use commands::config::ConfigCommands;
use commands::replay::ReplayArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "beaconregion", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay recorded batches and print detected regions
    Replay(ReplayArgs),

    /// Print the region fingerprint of one batch
    Fingerprint {
        /// Observations as <beacon_id>:<rssi>
        #[arg(required = true, allow_hyphen_values = true)]
        observations: Vec<String>,
    },

    /// View or modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Load the config file and install logging.
fn init(verbose: bool) -> Result<(ConfigFile, LoggingGuard), CliError> {
    let config = ConfigFile::load()?;
    let mut settings = config.logging.clone();
    if verbose {
        settings.level = "debug".to_string();
    }
    let guard = init_logging(&settings)?;
    Ok((config, guard))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands read the file themselves and skip logging setup.
        Commands::Config(command) => commands::config::run(command),
        Commands::Replay(args) => {
            let (config, _logging) = init(cli.verbose)?;
            commands::replay::run(args, &config)
        }
        Commands::Fingerprint { observations } => {
            let (_config, _logging) = init(cli.verbose)?;
            commands::fingerprint::run(&observations)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
