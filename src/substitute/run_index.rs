//! Character-to-run mapping for one paragraph.

use crate::model::Paragraph;

/// Position of one paragraph character inside its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpan {
    /// Character index in the concatenated paragraph text
    pub char_index: usize,
    /// Index of the run holding the character
    pub run: usize,
    /// Character index within that run's own text
    pub offset: usize,
}

/// Flattened index from paragraph characters to runs.
///
/// `run_of[i]` and `offset_of[i]` describe character `i` of
/// [`Paragraph::text`]. Indices count Unicode scalar values, not bytes.
/// The index is a snapshot: rebuild it after any run text changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunIndex {
    run_of: Vec<usize>,
    offset_of: Vec<usize>,
}

impl RunIndex {
    /// Build the index for a paragraph.
    pub fn build(paragraph: &Paragraph) -> Self {
        let mut index = Self::default();
        for (run, r) in paragraph.runs.iter().enumerate() {
            for (offset, _) in r.text.chars().enumerate() {
                index.run_of.push(run);
                index.offset_of.push(offset);
            }
        }
        index
    }

    /// Number of indexed characters.
    pub fn len(&self) -> usize {
        self.run_of.len()
    }

    /// Check if the paragraph had no text.
    pub fn is_empty(&self) -> bool {
        self.run_of.is_empty()
    }

    /// Run index per character.
    pub fn run_of(&self) -> &[usize] {
        &self.run_of
    }

    /// Offset within the run per character.
    pub fn offset_of(&self) -> &[usize] {
        &self.offset_of
    }

    /// Look up one character.
    pub fn span(&self, char_index: usize) -> Option<RunSpan> {
        Some(RunSpan {
            char_index,
            run: *self.run_of.get(char_index)?,
            offset: *self.offset_of.get(char_index)?,
        })
    }

    /// Spans covering `start..start + len`, or `None` if out of range.
    pub fn spans(&self, start: usize, len: usize) -> Option<Vec<RunSpan>> {
        let end = start.checked_add(len)?;
        if end > self.len() {
            return None;
        }
        (start..end).map(|i| self.span(i)).collect()
    }
}
