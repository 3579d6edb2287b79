//! INI configuration file.
//!
//! The file lives at `<config dir>/beaconregion/config.ini` and is optional:
//! a missing file means defaults everywhere.
//!
//! ```ini
//! [catalog]
//! path = /etc/beaconregion/regions.json
//! unknown_label = Unknown region
//!
//! [session]
//! resolution = inline
//!
//! [logging]
//! level = info
//! file = /var/log/beaconregion.log
//! ```

mod keys;

pub use keys::ConfigKey;

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::resolver::DEFAULT_UNKNOWN_LABEL;
use crate::session::{ResolutionMode, SessionConfig};

/// Default log filter when neither the config nor `RUST_LOG` says otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const CONFIG_DIR_NAME: &str = "beaconregion";
const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors that can occur while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No per-user configuration directory on this platform.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Reading or writing the file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A key holds a value it cannot take.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The key is not a known `section.key` pair.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// JSON region catalog. Without one, every region is unknown.
    pub path: Option<PathBuf>,
    /// Label shown for regions missing from the catalog.
    pub unknown_label: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: None,
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
        }
    }
}

/// `[session]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    pub resolution: ResolutionMode,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `beaconregion=debug`.
    pub level: String,
    /// Optional log file in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub catalog: CatalogSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

/// Default location of the configuration file.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini_str(&text)
    }

    /// Parse INI text. Unknown sections and keys are ignored.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.field()) {
                key.set(&mut config, value)?;
            }
        }

        Ok(config)
    }

    /// Render as INI.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section())).set(key.field(), value);
            }
        }
        ini
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        self.to_ini().write_to_file(path).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Session configuration derived from the file.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default().with_resolution(self.session.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.catalog.path, None);
        assert_eq!(config.catalog.unknown_label, DEFAULT_UNKNOWN_LABEL);
        assert_eq!(config.session.resolution, ResolutionMode::Inline);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_parse_full_file() {
        let text = "\
[catalog]
path = /tmp/regions.json
unknown_label = Nowhere

[session]
resolution = blocking

[logging]
level = debug
file = /tmp/beaconregion.log
";
        let config = ConfigFile::from_ini_str(text).unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/regions.json")));
        assert_eq!(config.catalog.unknown_label, "Nowhere");
        assert_eq!(config.session.resolution, ResolutionMode::Blocking);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/beaconregion.log")));
        assert_eq!(
            config.session_config().resolution,
            ResolutionMode::Blocking
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ConfigFile::from_ini_str("[logging]\nlevel = warn\n").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.catalog, CatalogSettings::default());
    }

    #[test]
    fn test_invalid_resolution_is_rejected() {
        let err = ConfigFile::from_ini_str("[session]\nresolution = eventually\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "session.resolution"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.catalog.path = Some(PathBuf::from("/data/regions.json"));
        config.session.resolution = ResolutionMode::Blocking;
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_path_is_io_error() {
        let err = ConfigFile::load_from(Path::new("/nonexistent/config.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
