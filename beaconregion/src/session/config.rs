//! Session configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Where resolver lookups run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Call the resolver directly on the batch consumer task.
    ///
    /// Right for in-memory catalogs.
    #[default]
    Inline,

    /// Run each lookup on tokio's blocking pool and await the result.
    ///
    /// For resolvers backed by slow or remote stores. Batches keep queueing
    /// in the channel meanwhile and are processed in order.
    Blocking,
}

impl ResolutionMode {
    /// Config-file spelling of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Inline => "inline",
            ResolutionMode::Blocking => "blocking",
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resolution mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown resolution mode '{0}' (expected 'inline' or 'blocking')")]
pub struct ParseResolutionModeError(pub String);

impl FromStr for ResolutionMode {
    type Err = ParseResolutionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inline" => Ok(ResolutionMode::Inline),
            "blocking" => Ok(ResolutionMode::Blocking),
            other => Err(ParseResolutionModeError(other.to_string())),
        }
    }
}

/// Configuration for a [`RegionSession`](super::RegionSession).
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Where resolver lookups run.
    pub resolution: ResolutionMode,
}

impl SessionConfig {
    /// Set the resolution mode.
    pub fn with_resolution(mut self, resolution: ResolutionMode) -> Self {
        self.resolution = resolution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution_mode() {
        assert_eq!("inline".parse::<ResolutionMode>(), Ok(ResolutionMode::Inline));
        assert_eq!(" Blocking ".parse::<ResolutionMode>(), Ok(ResolutionMode::Blocking));
        assert!("async".parse::<ResolutionMode>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for mode in [ResolutionMode::Inline, ResolutionMode::Blocking] {
            assert_eq!(mode.to_string().parse::<ResolutionMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_default_is_inline() {
        assert_eq!(SessionConfig::default().resolution, ResolutionMode::Inline);
    }
}
