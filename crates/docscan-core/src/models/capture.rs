//! Capture mode selected at session start.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Which pattern set a capture session applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// French bank account numbers.
    #[default]
    Iban,
    /// Passport and ID-card MRZ lines.
    Document,
}

impl CaptureMode {
    /// Heading shown over the viewfinder for this mode.
    pub fn title(&self) -> &'static str {
        match self {
            CaptureMode::Iban => "IBAN recognizer",
            CaptureMode::Document => "Documents recognizer",
        }
    }

    /// Prompt shown when a pass yields nothing usable.
    pub fn retry_prompt(&self) -> &'static str {
        match self {
            CaptureMode::Iban => "No iban detected, please try again!",
            CaptureMode::Document => "No document detected, please try again!",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::Iban => "iban",
            CaptureMode::Document => "document",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iban" => Ok(CaptureMode::Iban),
            "document" | "doc" | "mrz" => Ok(CaptureMode::Document),
            other => Err(InputError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_mode() {
        assert_eq!("IBAN".parse::<CaptureMode>().unwrap(), CaptureMode::Iban);
        assert_eq!(" document ".parse::<CaptureMode>().unwrap(), CaptureMode::Document);
        assert_eq!("mrz".parse::<CaptureMode>().unwrap(), CaptureMode::Document);
        assert!("passport".parse::<CaptureMode>().is_err());
    }

    #[test]
    fn test_mode_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&CaptureMode::Document).unwrap(), "\"document\"");
        let mode: CaptureMode = serde_json::from_str("\"iban\"").unwrap();
        assert_eq!(mode, CaptureMode::Iban);
    }
}
