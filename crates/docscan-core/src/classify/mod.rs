//! Line classification for recognized text.
//!
//! A line is classified against the pattern set of the session's
//! [`CaptureMode`]. Classification is pure: the same mode and line always
//! yield the same [`MatchResult`].

pub mod iban;
pub mod mrz;
pub mod patterns;

pub use iban::{format_iban, validate_iban, IbanMatcher};
pub use mrz::{IdCardMatcher, PassportMatcher};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::capture::CaptureMode;
use crate::models::config::ScanConfig;

/// Trait for single-format line matchers.
pub trait LineMatcher {
    /// Match one recognized line, returning the normalized field on success.
    fn match_line(&self, line: &str) -> Option<MatchResult>;
}

/// Kind of identity document an MRZ line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Passport,
    IdCard,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Passport => "Passport",
            DocumentKind::IdCard => "ID card",
        }
    }
}

/// Holder fields read from the capture groups of an MRZ line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderName {
    /// Issuing state or organisation (3 characters).
    pub issuing_country: String,
    /// Surname components joined with spaces.
    pub surname: String,
    /// Given names joined with spaces; may be empty.
    pub given_names: String,
}

/// A matched MRZ line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentField {
    pub kind: DocumentKind,
    /// The span of the line matched by the grammar.
    pub value: String,
    pub holder: HolderName,
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "match", rename_all = "snake_case")]
pub enum MatchResult {
    NoMatch,
    /// Whitespace-stripped French IBAN.
    Iban(String),
    DocumentField(DocumentField),
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }

    /// Normalized matched value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            MatchResult::NoMatch => None,
            MatchResult::Iban(value) => Some(value),
            MatchResult::DocumentField(field) => Some(&field.value),
        }
    }

    /// Status line shown to the user on a match.
    pub fn feedback(&self) -> Option<&'static str> {
        match self {
            MatchResult::NoMatch => None,
            MatchResult::Iban(_) => Some("Iban detected"),
            MatchResult::DocumentField(field) => Some(match field.kind {
                DocumentKind::Passport => "Passport detected",
                DocumentKind::IdCard => "ID card detected",
            }),
        }
    }
}

/// Dispatches lines to the matchers of a capture mode.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    iban: IbanMatcher,
    passport: PassportMatcher,
    id_card: IdCardMatcher,
}

impl Classifier {
    /// Create a classifier with default settings (no checksum verification).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from the scan configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new().with_iban_checksum(config.validate_iban_checksum)
    }

    /// Set IBAN MOD-97 checksum verification.
    pub fn with_iban_checksum(mut self, validate: bool) -> Self {
        self.iban = IbanMatcher::new().with_validation(validate);
        self
    }

    /// Classify one recognized line.
    pub fn classify(&self, mode: CaptureMode, line: &str) -> MatchResult {
        debug!(%mode, line, "classifying line");

        let result = match mode {
            CaptureMode::Iban => self.iban.match_line(line),
            CaptureMode::Document => self
                .passport
                .match_line(line)
                .or_else(|| self.id_card.match_line(line)),
        }
        .unwrap_or(MatchResult::NoMatch);

        if let Some(feedback) = result.feedback() {
            info!(%mode, value = result.value().unwrap_or_default(), "{}", feedback);
        }

        result
    }
}

/// Classify a line with the default classifier.
pub fn classify(mode: CaptureMode, line: &str) -> MatchResult {
    Classifier::new().classify(mode, line)
}
