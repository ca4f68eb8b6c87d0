//! Replace every occurrence of one token in one paragraph.

use super::{RunIndex, RunRewriter, TokenLocator};
use crate::error::{Error, Result};
use crate::model::Paragraph;

/// Default cap on replacements of one token within one paragraph.
pub const DEFAULT_MAX_REPLACEMENTS: usize = 10_000;

/// Repeatedly locates and rewrites a token until it no longer occurs.
///
/// After each replacement the search resumes right after the inserted
/// value, so text coming from a value is never matched again. Every
/// iteration either moves the cursor forward or shortens the paragraph,
/// which bounds the loop even when a value contains its own token.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSubstitutor {
    max_replacements: usize,
}

impl ParagraphSubstitutor {
    /// Create a substitutor with the default replacement cap.
    pub fn new() -> Self {
        Self {
            max_replacements: DEFAULT_MAX_REPLACEMENTS,
        }
    }

    /// Set the replacement cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.max_replacements = limit;
        self
    }

    /// Replace all occurrences of `token` with `value`.
    ///
    /// Returns the number of replacements made. An empty token is a no-op.
    pub fn substitute(&self, paragraph: &mut Paragraph, token: &str, value: &str) -> Result<usize> {
        let locator = TokenLocator::new(token);
        if locator.is_empty() {
            return Ok(0);
        }

        let value_len = value.chars().count();
        let mut cursor = 0;
        let mut count = 0;

        loop {
            let text = paragraph.text();
            let Some(start) = locator.find(&text, cursor) else {
                break;
            };

            if count == self.max_replacements {
                log::warn!(
                    "Stopping after {} replacements of {:?} in one paragraph",
                    count,
                    token
                );
                return Err(Error::ReplacementLimit {
                    token: token.to_string(),
                    limit: self.max_replacements,
                });
            }

            let index = RunIndex::build(paragraph);
            if !RunRewriter::rewrite(paragraph, &index, start, locator.len(), value) {
                break;
            }

            // Text left of the cursor is never searched again.
            cursor = start + value_len;
            count += 1;
        }

        Ok(count)
    }
}

impl Default for ParagraphSubstitutor {
    fn default() -> Self {
        Self::new()
    }
}
