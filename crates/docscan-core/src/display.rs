//! Result screen content for a matched field.

use serde::{Deserialize, Serialize};

use crate::classify::{format_iban, HolderName, MatchResult};
use crate::models::config::DisplayConfig;

/// What the result screen shows for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    /// Screen heading.
    pub title: String,
    /// Value formatted for reading.
    pub value: String,
    /// Normalized value as matched.
    pub raw: String,
    /// Secondary line, e.g. the document holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ResultView {
    /// Build the view with the default display settings.
    pub fn from_match(result: &MatchResult) -> Option<Self> {
        Self::with_config(result, &DisplayConfig::default())
    }

    /// Build the view; `None` for [`MatchResult::NoMatch`].
    pub fn with_config(result: &MatchResult, config: &DisplayConfig) -> Option<Self> {
        match result {
            MatchResult::NoMatch => None,
            MatchResult::Iban(iban) => Some(Self {
                title: "IBAN".to_string(),
                value: format_iban(iban, config.iban_group_size),
                raw: iban.clone(),
                detail: None,
            }),
            MatchResult::DocumentField(field) => Some(Self {
                title: field.kind.label().to_string(),
                value: field.value.clone(),
                raw: field.value.clone(),
                detail: holder_summary(&field.holder),
            }),
        }
    }
}

/// `SURNAME, GIVEN NAMES (CTY)`, dropping empty parts.
fn holder_summary(holder: &HolderName) -> Option<String> {
    if holder.surname.is_empty() && holder.given_names.is_empty() {
        return None;
    }

    let mut summary = holder.surname.clone();
    if !holder.given_names.is_empty() {
        if !summary.is_empty() {
            summary.push_str(", ");
        }
        summary.push_str(&holder.given_names);
    }
    if !holder.issuing_country.is_empty() {
        summary.push_str(&format!(" ({})", holder.issuing_country));
    }

    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::models::capture::CaptureMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_iban_view() {
        let result = classify(CaptureMode::Iban, "FR7630006000011234567890189");
        let view = ResultView::from_match(&result).unwrap();
        assert_eq!(view.title, "IBAN");
        assert_eq!(view.value, "FR76 3000 6000 0112 3456 7890 189");
        assert_eq!(view.raw, "FR7630006000011234567890189");
        assert_eq!(view.detail, None);
    }

    #[test]
    fn test_iban_view_ungrouped() {
        let result = MatchResult::Iban("FR7630006000011234567890189".to_string());
        let view = ResultView::with_config(&result, &DisplayConfig { iban_group_size: 0 }).unwrap();
        assert_eq!(view.value, "FR7630006000011234567890189");
    }

    #[test]
    fn test_document_view() {
        let result = classify(CaptureMode::Document, "P<FRADUPONT<<JEAN<<<<<<<<<<<<<<<<<<<<<<<<<<<");
        let view = ResultView::from_match(&result).unwrap();
        assert_eq!(view.title, "Passport");
        assert_eq!(view.detail.as_deref(), Some("DUPONT, JEAN (FRA)"));

        let result = classify(CaptureMode::Document, "IDFRADUPONT<<<<<<<<<<<<<<<<<<<750123");
        let view = ResultView::from_match(&result).unwrap();
        assert_eq!(view.title, "ID card");
        assert_eq!(view.detail.as_deref(), Some("DUPONT (FRA)"));
    }

    #[test]
    fn test_no_match_has_no_view() {
        assert_eq!(ResultView::from_match(&MatchResult::NoMatch), None);
    }
}
