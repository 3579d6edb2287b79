//! CLI subcommands.

pub mod config;
pub mod fingerprint;
pub mod replay;
