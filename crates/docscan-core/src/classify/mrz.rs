//! Passport and ID-card MRZ line matchers.
//!
//! Only the first MRZ line is recognized. The grammars are fixed-width,
//! anchored at the start of the trimmed line, and take OCR output as-is:
//! no filler repair, no check digits.

use regex::Captures;

use super::patterns::{ID_CARD_MRZ, PASSPORT_MRZ};
use super::{DocumentField, DocumentKind, HolderName, LineMatcher, MatchResult};

/// MRZ filler character.
pub const FILLER: char = '<';

/// Passport MRZ line matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassportMatcher;

impl LineMatcher for PassportMatcher {
    fn match_line(&self, line: &str) -> Option<MatchResult> {
        let caps = PASSPORT_MRZ.captures(line.trim())?;

        let mut surname = caps[2].to_string();
        if let Some(second) = caps.get(4) {
            surname.push(' ');
            surname.push_str(second.as_str());
        }

        let holder = HolderName {
            issuing_country: caps[1].to_string(),
            surname,
            given_names: caps[5].to_string(),
        };

        Some(document_match(DocumentKind::Passport, &caps, holder))
    }
}

/// ID-card MRZ line matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdCardMatcher;

impl LineMatcher for IdCardMatcher {
    fn match_line(&self, line: &str) -> Option<MatchResult> {
        let caps = ID_CARD_MRZ.captures(line.trim())?;
        let (surname, given_names) = split_name_field(&caps[4]);

        let holder = HolderName {
            issuing_country: caps[3].to_string(),
            surname,
            given_names,
        };

        Some(document_match(DocumentKind::IdCard, &caps, holder))
    }
}

fn document_match(kind: DocumentKind, caps: &Captures<'_>, holder: HolderName) -> MatchResult {
    MatchResult::DocumentField(DocumentField {
        kind,
        value: caps[0].to_string(),
        holder,
    })
}

/// Split a filler-padded name field into surname and given names.
///
/// `<<` separates the surname from the given names; single fillers
/// separate name components.
pub fn split_name_field(field: &str) -> (String, String) {
    let field = field.trim_end_matches(FILLER);
    let (surname, given) = field.split_once("<<").unwrap_or((field, ""));
    (unfill(surname), unfill(given))
}

fn unfill(part: &str) -> String {
    part.split(FILLER)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
