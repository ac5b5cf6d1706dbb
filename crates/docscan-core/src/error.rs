//! Error types for the docscan-core library.
//!
//! Classification itself never fails: a line either matches or it does not.
//! These errors cover decoding the recognized text handed to it. Config
//! files report plain `std::io::Error`, like the rest of the file handling.

use thiserror::Error;

/// Main error type for the docscan library.
#[derive(Error, Debug)]
pub enum DocscanError {
    /// OCR input could not be decoded.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to decoding recognized text handed over by the OCR side.
#[derive(Error, Debug)]
pub enum InputError {
    /// Unknown capture mode name.
    #[error("unknown capture mode: {0} (expected \"iban\" or \"document\")")]
    UnknownMode(String),

    /// The recognized text payload is malformed.
    #[error("malformed recognized text: {0}")]
    Malformed(String),
}

/// Result type for the docscan library.
pub type Result<T> = std::result::Result<T, DocscanError>;
