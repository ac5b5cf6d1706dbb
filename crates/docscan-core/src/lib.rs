//! Core library for docscan.
//!
//! This crate provides:
//! - Line classification for French IBANs and passport / ID-card MRZ lines
//! - Scan sessions that consume whole OCR passes and produce user feedback
//! - Result formatting for display
//! - Configuration for the scan pipeline

pub mod classify;
pub mod display;
pub mod error;
pub mod models;
pub mod scan;

pub use classify::{classify, Classifier, DocumentField, DocumentKind, HolderName, MatchResult};
pub use display::ResultView;
pub use error::{DocscanError, Result};
pub use models::capture::CaptureMode;
pub use models::config::DocscanConfig;
pub use models::text::{Bounds, RecognizedText, TextBlock, TextLine};
pub use scan::{ScanOutcome, ScanStats, Scanner};
