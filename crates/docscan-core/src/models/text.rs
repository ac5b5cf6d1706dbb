//! Recognized text as handed over by the OCR collaborator.
//!
//! One [`RecognizedText`] is one OCR pass over a frame or a photo. It is
//! organised the way on-device recognizers report text: blocks of lines,
//! each optionally carrying its layout bounds.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

/// Axis-aligned bounding rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle (never negative).
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    /// Height of the rectangle (never negative).
    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }
}

/// A single recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text content.
    pub text: String,

    /// Layout bounds, if the recognizer reported them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: None,
        }
    }
}

/// A block of lines the recognizer grouped together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl TextBlock {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self {
            lines,
            bounds: None,
        }
    }
}

/// Result of one OCR pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

impl RecognizedText {
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Build a pass from plain text.
    ///
    /// Every non-blank line becomes a [`TextLine`]; runs of blank lines
    /// separate blocks.
    pub fn from_plain_text(text: &str) -> Self {
        let mut blocks = Vec::new();
        let mut current = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    blocks.push(TextBlock::new(std::mem::take(&mut current)));
                }
                continue;
            }
            current.push(TextLine::new(line));
        }

        if !current.is_empty() {
            blocks.push(TextBlock::new(current));
        }

        Self { blocks }
    }

    /// Decode a pass from its JSON form (`{"blocks": [{"lines": [...]}]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let text: Self = serde_json::from_str(json)?;
        if text.blocks.iter().any(|b| b.lines.iter().any(|l| l.text.contains('\n'))) {
            return Err(InputError::Malformed("line text contains a line break".to_string()).into());
        }
        Ok(text)
    }

    /// All lines in block order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// True when the pass holds no line with visible text.
    pub fn is_empty(&self) -> bool {
        self.lines().all(|l| l.text.trim().is_empty())
    }

    /// Number of lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_plain_text_splits_blocks() {
        let text = RecognizedText::from_plain_text("RIB\nFR76 3000\n\n\nTitulaire\r\nM DUPONT\n");
        assert_eq!(text.blocks.len(), 2);
        assert_eq!(text.line_count(), 4);
        assert_eq!(text.blocks[1].lines[0].text, "Titulaire");
    }

    #[test]
    fn test_from_plain_text_empty() {
        let text = RecognizedText::from_plain_text("\n   \n");
        assert!(text.blocks.is_empty());
        assert!(text.is_empty());
    }

    #[test]
    fn test_from_json_with_bounds() {
        let json = r#"{"blocks":[{"lines":[{"text":"P<FRADUPONT<<JEAN","bounds":{"left":1,"top":2,"right":41,"bottom":12}}]}]}"#;
        let text = RecognizedText::from_json(json).unwrap();
        let line = text.lines().next().unwrap();
        assert_eq!(line.text, "P<FRADUPONT<<JEAN");
        assert_eq!(line.bounds.map(|b| (b.width(), b.height())), Some((40, 10)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(RecognizedText::from_json("not json").is_err());
        assert!(RecognizedText::from_json(r#"{"blocks":[{"lines":[{"text":"a\nb"}]}]}"#).is_err());
    }

    #[test]
    fn test_whitespace_only_pass_is_empty() {
        let text = RecognizedText::new(vec![TextBlock::new(vec![TextLine::new("  ")])]);
        assert!(text.is_empty());
        assert_eq!(text.line_count(), 1);
    }
}
