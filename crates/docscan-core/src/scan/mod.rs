//! Scan sessions over successive OCR passes.
//!
//! A [`Scanner`] lives for one capture session. Its mode is fixed at
//! construction; every OCR pass is fed through [`Scanner::scan`], which
//! classifies the lines in block order and stops at the first match.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::{Classifier, MatchResult};
use crate::models::capture::CaptureMode;
use crate::models::text::RecognizedText;

/// Outcome of one OCR pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "match", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The recognizer returned no text at all.
    NoText,
    /// Text was found but no line matched.
    NoMatch,
    /// First matching line of the pass.
    Matched(MatchResult),
}

impl ScanOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ScanOutcome::Matched(_))
    }

    pub fn as_match(&self) -> Option<&MatchResult> {
        match self {
            ScanOutcome::Matched(result) => Some(result),
            _ => None,
        }
    }

    /// Status line shown under the viewfinder.
    pub fn feedback(&self, mode: CaptureMode) -> &'static str {
        match self {
            ScanOutcome::Matched(result) => result.feedback().unwrap_or(mode.retry_prompt()),
            ScanOutcome::NoText | ScanOutcome::NoMatch => mode.retry_prompt(),
        }
    }
}

/// Counters for a capture session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// OCR passes fed to the scanner.
    pub passes: u64,
    /// Lines classified across all passes.
    pub lines: u64,
    /// Passes that produced a match.
    pub matches: u64,
}

/// One capture session.
#[derive(Debug, Clone)]
pub struct Scanner {
    mode: CaptureMode,
    classifier: Classifier,
    capture_ready: bool,
    stats: ScanStats,
}

impl Scanner {
    /// Start a session with the default classifier.
    pub fn new(mode: CaptureMode) -> Self {
        Self::with_classifier(mode, Classifier::new())
    }

    pub fn with_classifier(mode: CaptureMode, classifier: Classifier) -> Self {
        Self {
            mode,
            classifier,
            capture_ready: false,
            stats: ScanStats::default(),
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Whether a document was seen and a still capture may be taken.
    ///
    /// Only meaningful in document mode; an IBAN match navigates straight to
    /// the result instead.
    pub fn capture_ready(&self) -> bool {
        self.capture_ready
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Process one OCR pass.
    pub fn scan(&mut self, text: &RecognizedText) -> ScanOutcome {
        self.stats.passes += 1;

        if text.is_empty() {
            debug!(mode = %self.mode, "no text in pass");
            if self.mode == CaptureMode::Document {
                self.capture_ready = false;
            }
            return ScanOutcome::NoText;
        }

        for line in text.lines() {
            trace!(target: "docscan::mrz", "{}", line.text);
            self.stats.lines += 1;

            let result = self.classifier.classify(self.mode, &line.text);
            if result.is_match() {
                self.stats.matches += 1;
                if matches!(result, MatchResult::DocumentField(_)) {
                    self.capture_ready = true;
                }
                return ScanOutcome::Matched(result);
            }
        }

        ScanOutcome::NoMatch
    }

    /// Feed a sequence of passes through the session.
    ///
    /// `on_outcome` sees every pass that was scanned, with its index. When
    /// `stop_on_match` is set the sequence is abandoned after the first
    /// match. Returns the index of the first matching pass, if any.
    pub fn scan_passes<'a, I, F>(
        &mut self,
        passes: I,
        stop_on_match: bool,
        mut on_outcome: F,
    ) -> Option<usize>
    where
        I: IntoIterator<Item = &'a RecognizedText>,
        F: FnMut(usize, &ScanOutcome),
    {
        let mut first_match = None;

        for (i, pass) in passes.into_iter().enumerate() {
            let outcome = self.scan(pass);
            on_outcome(i, &outcome);

            if outcome.is_match() && first_match.is_none() {
                first_match = Some(i);
                if stop_on_match {
                    break;
                }
            }
        }

        first_match
    }
}
