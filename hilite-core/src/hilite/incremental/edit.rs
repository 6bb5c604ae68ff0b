//! Text edits

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Replace `range` (byte offsets into the old text) with `replacement`.
///
/// Insertions have an empty range, deletions an empty replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

/// Caller mistakes when asking for an incremental update. Lexing itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit range {start}..{end} is inverted")]
    InvertedRange { start: usize, end: usize },
    #[error("edit range ends at {end} but the text is only {len} bytes long")]
    OutOfBounds { end: usize, len: usize },
    #[error("edit offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
    #[error("expected {expected} line states for the old text, got {found}")]
    LineStateMismatch { expected: usize, found: usize },
}

impl TextEdit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset..offset, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::new(range, String::new())
    }

    /// Change in text length once applied.
    pub fn delta(&self) -> isize {
        self.replacement.len() as isize - self.range.len() as isize
    }

    /// End of the replacement in the new text.
    pub fn new_end(&self) -> usize {
        self.range.start + self.replacement.len()
    }

    pub fn validate(&self, text: &str) -> Result<(), EditError> {
        let Range { start, end } = self.range;
        if start > end {
            return Err(EditError::InvertedRange { start, end });
        }
        if end > text.len() {
            return Err(EditError::OutOfBounds {
                end,
                len: text.len(),
            });
        }
        for offset in [start, end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }

    /// The edited text.
    pub fn apply_to(&self, text: &str) -> Result<String, EditError> {
        self.validate(text)?;
        let mut edited = String::with_capacity(text.len() + self.replacement.len());
        edited.push_str(&text[..self.range.start]);
        edited.push_str(&self.replacement);
        edited.push_str(&text[self.range.end..]);
        Ok(edited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_replacement() {
        let edit = TextEdit::new(1..3, "XYZ");
        assert_eq!(edit.apply_to("abcd").unwrap(), "aXYZd");
        assert_eq!(edit.delta(), 1);
        assert_eq!(edit.new_end(), 4);
        assert_eq!(TextEdit::insert(4, "!").apply_to("abcd").unwrap(), "abcd!");
        assert_eq!(TextEdit::delete(0..4).apply_to("abcd").unwrap(), "");
    }

    #[test]
    fn rejects_bad_ranges() {
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = TextEdit::new(3..1, "");
        assert_eq!(
            inverted.validate("abcd"),
            Err(EditError::InvertedRange { start: 3, end: 1 })
        );
        assert_eq!(
            TextEdit::insert(5, "x").validate("abcd"),
            Err(EditError::OutOfBounds { end: 5, len: 4 })
        );
        assert_eq!(
            TextEdit::insert(1, "x").validate("é"),
            Err(EditError::NotCharBoundary { offset: 1 })
        );
    }
}
