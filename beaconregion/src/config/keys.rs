//! Typed `section.key` names for get/set access.

use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};

/// A settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    CatalogPath,
    CatalogUnknownLabel,
    SessionResolution,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::CatalogPath,
            ConfigKey::CatalogUnknownLabel,
            ConfigKey::SessionResolution,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    /// INI section the key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::CatalogPath | ConfigKey::CatalogUnknownLabel => "catalog",
            ConfigKey::SessionResolution => "session",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within its section.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigKey::CatalogPath => "path",
            ConfigKey::CatalogUnknownLabel => "unknown_label",
            ConfigKey::SessionResolution => "resolution",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.field())
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        let path_str = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };

        match self {
            ConfigKey::CatalogPath => path_str(&config.catalog.path),
            ConfigKey::CatalogUnknownLabel => config.catalog.unknown_label.clone(),
            ConfigKey::SessionResolution => config.session.resolution.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => path_str(&config.logging.file),
        }
    }

    /// Parse `value` and store it. An empty value clears optional paths.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let optional_path = |v: &str| (!v.is_empty()).then(|| PathBuf::from(v));
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match self {
            ConfigKey::CatalogPath => config.catalog.path = optional_path(value),
            ConfigKey::CatalogUnknownLabel => {
                if value.is_empty() {
                    return Err(invalid("label must not be empty"));
                }
                config.catalog.unknown_label = value.to_string();
            }
            ConfigKey::SessionResolution => {
                config.session.resolution = value.parse().map_err(
                    |e: crate::session::ParseResolutionModeError| invalid(&e.to_string()),
                )?;
            }
            ConfigKey::LoggingLevel => {
                if value.is_empty() {
                    return Err(invalid("level must not be empty"));
                }
                config.logging.level = value.to_string();
            }
            ConfigKey::LoggingFile => config.logging.file = optional_path(value),
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s.trim())
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ResolutionMode;

    #[test]
    fn test_parse_key_names() {
        assert_eq!("catalog.path".parse::<ConfigKey>().unwrap(), ConfigKey::CatalogPath);
        assert_eq!(
            "session.resolution".parse::<ConfigKey>().unwrap(),
            ConfigKey::SessionResolution
        );
        assert!(matches!(
            "catalog.colour".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_set_then_get() {
        let mut config = ConfigFile::default();
        ConfigKey::SessionResolution.set(&mut config, "blocking").unwrap();
        ConfigKey::CatalogPath.set(&mut config, "/srv/regions.json").unwrap();

        assert_eq!(config.session.resolution, ResolutionMode::Blocking);
        assert_eq!(ConfigKey::CatalogPath.get(&config), "/srv/regions.json");
    }

    #[test]
    fn test_empty_value_clears_path() {
        let mut config = ConfigFile::default();
        ConfigKey::LoggingFile.set(&mut config, "/tmp/log").unwrap();
        ConfigKey::LoggingFile.set(&mut config, "").unwrap();
        assert_eq!(config.logging.file, None);
        assert_eq!(ConfigKey::LoggingFile.get(&config), "");
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut config = ConfigFile::default();
        let err = ConfigKey::CatalogUnknownLabel.set(&mut config, "  ").unwrap_err();
        assert!(err.to_string().contains("catalog.unknown_label"));
    }
}
