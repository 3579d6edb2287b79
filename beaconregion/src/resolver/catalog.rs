//! In-memory region catalog loaded from JSON.
//!
//! # File Format
//!
//! ```json
//! {
//!   "unknown_label": "Unmapped area",
//!   "regions": [
//!     { "beacons": ["b1", "b2"], "label": "Lobby", "points_of_interest": ["Info desk"] },
//!     { "beacons": ["b2", "b3"], "label": "Corridor" }
//!   ]
//! }
//! ```
//!
//! `points_of_interest` may be omitted (no POI data) or empty (known to have
//! none). Beacon order inside an entry is irrelevant.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::RegionResolver;
use crate::fingerprint::RegionFingerprint;
use crate::observation::BeaconId;

/// Label used for fingerprints the catalog does not know.
pub const DEFAULT_UNKNOWN_LABEL: &str = "Unknown region";

/// Errors that can occur while loading a region catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog is not valid JSON or does not match the schema.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry is structurally valid JSON but unusable.
    #[error("Invalid catalog entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Two entries describe the same beacon pair.
    #[error("Duplicate region {0}")]
    DuplicateRegion(String),
}

/// One region as written in the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionEntry {
    /// The two beacons whose dominance identifies the region.
    pub beacons: Vec<BeaconId>,

    /// Human-readable label.
    pub label: String,

    /// Points of interest, if the region has POI data.
    #[serde(default)]
    pub points_of_interest: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    unknown_label: Option<String>,
    #[serde(default)]
    regions: Vec<RegionEntry>,
}

#[derive(Debug, Clone)]
struct RegionInfo {
    label: String,
    points_of_interest: Option<Vec<String>>,
}

/// Region resolver backed by a hash map.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    regions: HashMap<RegionFingerprint, RegionInfo>,
    unknown_label: String,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionCatalog {
    /// Create an empty catalog. Every lookup resolves to the unknown label.
    pub fn new() -> Self {
        Self {
            regions: HashMap::new(),
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
        }
    }

    /// Set the label used for unknown fingerprints.
    pub fn with_unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    /// Add or replace a region.
    pub fn insert(
        &mut self,
        fingerprint: RegionFingerprint,
        label: impl Into<String>,
        points_of_interest: Option<Vec<String>>,
    ) {
        self.regions.insert(
            fingerprint,
            RegionInfo {
                label: label.into(),
                points_of_interest,
            },
        );
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_region(
        mut self,
        fingerprint: RegionFingerprint,
        label: impl Into<String>,
        points_of_interest: Option<Vec<String>>,
    ) -> Self {
        self.insert(fingerprint, label, points_of_interest);
        self
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        if let Some(label) = file.unknown_label {
            catalog.unknown_label = label;
        }

        for (index, entry) in file.regions.into_iter().enumerate() {
            let [a, b]: [BeaconId; 2] =
                entry
                    .beacons
                    .try_into()
                    .map_err(|beacons: Vec<BeaconId>| CatalogError::InvalidEntry {
                        index,
                        reason: format!("expected 2 beacons, found {}", beacons.len()),
                    })?;

            let fingerprint = RegionFingerprint::combine(a, b);
            if catalog.regions.contains_key(&fingerprint) {
                return Err(CatalogError::DuplicateRegion(fingerprint.to_string()));
            }
            catalog.insert(fingerprint, entry.label, entry.points_of_interest);
        }

        tracing::debug!(regions = catalog.len(), "Region catalog parsed");
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), regions = catalog.len(), "Region catalog loaded");
        Ok(catalog)
    }

    /// Number of known regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog knows no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether a fingerprint is a known region.
    pub fn contains(&self, fingerprint: &RegionFingerprint) -> bool {
        self.regions.contains_key(fingerprint)
    }

    /// Label used for unknown fingerprints.
    pub fn unknown_label(&self) -> &str {
        &self.unknown_label
    }
}

impl RegionResolver for RegionCatalog {
    fn resolve_label(&self, fingerprint: &RegionFingerprint) -> String {
        match self.regions.get(fingerprint) {
            Some(info) => info.label.clone(),
            None => {
                tracing::debug!(region = %fingerprint, "Unknown region fingerprint");
                self.unknown_label.clone()
            }
        }
    }

    fn resolve_points_of_interest(&self, fingerprint: &RegionFingerprint) -> Option<Vec<String>> {
        self.regions
            .get(fingerprint)
            .and_then(|info| info.points_of_interest.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fp(a: &str, b: &str) -> RegionFingerprint {
        RegionFingerprint::combine(a.into(), b.into())
    }

    const CATALOG: &str = r#"{
        "unknown_label": "Somewhere",
        "regions": [
            { "beacons": ["b2", "b1"], "label": "Lobby", "points_of_interest": ["Info desk", "Cafe"] },
            { "beacons": ["b2", "b3"], "label": "Corridor" },
            { "beacons": ["b3", "b4"], "label": "Storage", "points_of_interest": [] }
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = RegionCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.unknown_label(), "Somewhere");
        assert!(catalog.contains(&fp("b1", "b2")));
    }

    #[test]
    fn test_label_lookup_ignores_beacon_order() {
        let catalog = RegionCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.resolve_label(&fp("b1", "b2")), "Lobby");
        assert_eq!(catalog.resolve_label(&fp("b2", "b1")), "Lobby");
    }

    #[test]
    fn test_unknown_region_gets_placeholder() {
        let catalog = RegionCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.resolve_label(&fp("x", "y")), "Somewhere");
        assert_eq!(catalog.resolve_points_of_interest(&fp("x", "y")), None);
    }

    #[test]
    fn test_absent_and_empty_poi_are_distinct() {
        let catalog = RegionCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.resolve_points_of_interest(&fp("b2", "b3")), None);
        assert_eq!(
            catalog.resolve_points_of_interest(&fp("b3", "b4")),
            Some(vec![])
        );
        assert_eq!(
            catalog.resolve_points_of_interest(&fp("b1", "b2")),
            Some(vec!["Info desk".to_string(), "Cafe".to_string()])
        );
    }

    #[test]
    fn test_default_unknown_label() {
        let catalog = RegionCatalog::from_json_str(r#"{ "regions": [] }"#).unwrap();
        assert_eq!(catalog.unknown_label(), DEFAULT_UNKNOWN_LABEL);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_entry_with_wrong_beacon_count_is_rejected() {
        let json = r#"{ "regions": [ { "beacons": ["b1"], "label": "Half" } ] }"#;
        let err = RegionCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { index: 0, .. }));
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_duplicate_region_is_rejected() {
        let json = r#"{ "regions": [
            { "beacons": ["a", "b"], "label": "One" },
            { "beacons": ["b", "a"], "label": "Two" }
        ] }"#;
        let err = RegionCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRegion(ref r) if r == "a+b"));
    }

    #[test]
    fn test_malformed_json() {
        let err = RegionCatalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = RegionCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.resolve_label(&fp("b3", "b4")), "Storage");
    }

    #[test]
    fn test_load_missing_file() {
        let err = RegionCatalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_builder() {
        let catalog = RegionCatalog::new()
            .with_unknown_label("?")
            .with_region(fp("a", "b"), "Hall", Some(vec!["Stairs".into()]));
        assert_eq!(catalog.resolve_label(&fp("a", "b")), "Hall");
        assert_eq!(catalog.resolve_label(&fp("a", "c")), "?");
    }
}
