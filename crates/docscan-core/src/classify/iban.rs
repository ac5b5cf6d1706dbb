//! French IBAN detection, validation and formatting.

use tracing::debug;

use super::patterns::{IBAN_FR, IBAN_PREFIX_FRANCE};
use super::{LineMatcher, MatchResult};

/// IBAN line matcher.
#[derive(Debug, Clone, Default)]
pub struct IbanMatcher {
    validate: bool,
}

impl IbanMatcher {
    /// Create a new IBAN matcher. Checksums are not verified by default.
    pub fn new() -> Self {
        Self { validate: false }
    }

    /// Set whether to verify the MOD-97 checksum on top of the grammar.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl LineMatcher for IbanMatcher {
    fn match_line(&self, line: &str) -> Option<MatchResult> {
        let candidate = locate_iban(line)?;

        if !IBAN_FR.is_match(&candidate) {
            return None;
        }

        if self.validate && !validate_iban(&candidate) {
            debug!("IBAN {} failed checksum", candidate);
            return None;
        }

        Some(MatchResult::Iban(candidate))
    }
}

/// Strip whitespace and cut the line at the first `FR`.
///
/// Returns `None` when the line carries no French prefix at all.
pub fn locate_iban(line: &str) -> Option<String> {
    let compact = strip_whitespace(line);
    let start = compact.find(IBAN_PREFIX_FRANCE)?;
    Some(compact[start..].to_string())
}

/// Remove every whitespace character.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validate an IBAN using the checksum algorithm.
///
/// Algorithm:
/// 1. Move first 4 characters to the end
/// 2. Replace letters with numbers (A=10, B=11, ..., Z=35)
/// 3. The resulting number mod 97 should equal 1
pub fn validate_iban(iban: &str) -> bool {
    let iban = strip_whitespace(iban).to_uppercase();

    if iban.len() < 5 || !iban.is_ascii() {
        return false;
    }

    let (head, tail) = iban.split_at(4);
    if !head[..2].chars().all(|c| c.is_ascii_alphabetic())
        || !head[2..].chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }

    // Fold digit by digit; the number is far too large for u64.
    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return false,
        };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }

    remainder == 1
}

/// Format an IBAN in groups of `group_size` characters.
///
/// A group size of zero returns the compact form.
pub fn format_iban(iban: &str, group_size: usize) -> String {
    let cleaned = strip_whitespace(iban);
    if group_size == 0 {
        return cleaned;
    }

    cleaned
        .chars()
        .collect::<Vec<char>>()
        .chunks(group_size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}
