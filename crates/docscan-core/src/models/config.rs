//! Configuration structures for the scan pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::capture::CaptureMode;

/// Main configuration for docscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocscanConfig {
    /// Scan / classification configuration.
    pub scan: ScanConfig,

    /// Result display configuration.
    pub display: DisplayConfig,
}

/// Line classification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Mode used when none is given on the command line.
    pub default_mode: CaptureMode,

    /// Verify the ISO 13616 MOD-97 checksum of detected IBANs.
    pub validate_iban_checksum: bool,

    /// Stop at the first matching pass in batch runs.
    pub stop_on_first_match: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_mode: CaptureMode::Iban,
            validate_iban_checksum: false,
            stop_on_first_match: true,
        }
    }
}

/// Result display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of characters per IBAN group (0 = no grouping).
    pub iban_group_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { iban_group_size: 4 }
    }
}

impl DocscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DocscanConfig::default();
        config.scan.default_mode = CaptureMode::Document;
        config.scan.validate_iban_checksum = true;
        config.save(&path).unwrap();

        assert_eq!(DocscanConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"scan":{"default_mode":"document"}}"#).unwrap();

        let config = DocscanConfig::from_file(&path).unwrap();
        assert_eq!(config.scan.default_mode, CaptureMode::Document);
        assert!(!config.scan.validate_iban_checksum);
        assert_eq!(config.display.iban_group_size, 4);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();

        let err = DocscanConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
