//! WASM bindings for docscan.
//!
//! Browser or hybrid-app front ends run their own OCR and hand the
//! recognized text over to these bindings for classification.

use wasm_bindgen::prelude::*;

use docscan_core::classify;
use docscan_core::{CaptureMode, Classifier, RecognizedText, ResultView};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_mode(mode: &str) -> Result<CaptureMode, JsValue> {
    mode.parse::<CaptureMode>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Classify one recognized line.
///
/// `mode` is `"iban"` or `"document"`.
#[wasm_bindgen]
pub fn classify_line(mode: &str, line: &str) -> Result<JsValue, JsValue> {
    let mode = parse_mode(mode)?;
    to_js(&classify::classify(mode, line))
}

/// Validate an IBAN checksum (MOD-97).
#[wasm_bindgen]
pub fn validate_iban(iban: &str) -> bool {
    classify::validate_iban(iban)
}

/// Format an IBAN in groups of four.
#[wasm_bindgen]
pub fn format_iban(iban: &str) -> String {
    classify::format_iban(iban, 4)
}

/// Capture session for browser use.
#[wasm_bindgen]
pub struct Scanner {
    inner: docscan_core::Scanner,
}

#[wasm_bindgen]
impl Scanner {
    /// Start a session in the given mode.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, validate_checksum: bool) -> Result<Scanner, JsValue> {
        let mode = parse_mode(mode)?;
        let classifier = Classifier::new().with_iban_checksum(validate_checksum);
        Ok(Self {
            inner: docscan_core::Scanner::with_classifier(mode, classifier),
        })
    }

    /// Scan one pass given as plain text (one OCR line per line).
    #[wasm_bindgen]
    pub fn scan_text(&mut self, text: &str) -> Result<JsValue, JsValue> {
        self.scan(&RecognizedText::from_plain_text(text))
    }

    /// Scan one pass given as JSON (`{"blocks": [{"lines": [{"text": ...}]}]}`).
    #[wasm_bindgen]
    pub fn scan_json(&mut self, json: &str) -> Result<JsValue, JsValue> {
        let text = RecognizedText::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.scan(&text)
    }

    /// Heading for the session's mode.
    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.inner.mode().title().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn capture_ready(&self) -> bool {
        self.inner.capture_ready()
    }

    /// Session counters as `{passes, lines, matches}`.
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.stats())
    }

    fn scan(&mut self, text: &RecognizedText) -> Result<JsValue, JsValue> {
        #[derive(serde::Serialize)]
        struct ScanResultJs {
            matched: bool,
            feedback: String,
            view: Option<ResultView>,
        }

        let mode = self.inner.mode();
        let outcome = self.inner.scan(text);
        let output = ScanResultJs {
            matched: outcome.is_match(),
            feedback: outcome.feedback(mode).to_string(),
            view: outcome.as_match().and_then(ResultView::from_match),
        };

        to_js(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_validate() {
        assert_eq!(format_iban("FR7630006000011234567890189"), "FR76 3000 6000 0112 3456 7890 189");
        assert!(validate_iban("FR76 3000 6000 0112 3456 7890 189"));
    }

    #[test]
    fn test_session_state_native() {
        let mut scanner = Scanner {
            inner: docscan_core::Scanner::new(CaptureMode::Document),
        };
        assert_eq!(scanner.title(), "Documents recognizer");
        scanner
            .inner
            .scan(&RecognizedText::from_plain_text("IDFRADUPONT<<<<<<<<<<<<<<<<<<<750123"));
        assert!(scanner.capture_ready());
    }
}
