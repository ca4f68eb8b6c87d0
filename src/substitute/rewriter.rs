//! Run mutation for one matched token.

use super::RunIndex;
use crate::model::Paragraph;

/// Rewrites the runs covered by one match.
///
/// The first run touched by the match receives the value in place of its
/// matched characters; every other touched run loses its matched characters.
/// Characters outside the match and all run styles are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunRewriter;

impl RunRewriter {
    /// Replace characters `start..start + len` of the paragraph with `value`.
    ///
    /// `index` must have been built from `paragraph` as it is now. Returns
    /// `false` and leaves the paragraph untouched if the range is out of
    /// bounds.
    pub fn rewrite(
        paragraph: &mut Paragraph,
        index: &RunIndex,
        start: usize,
        len: usize,
        value: &str,
    ) -> bool {
        let Some(spans) = index.spans(start, len) else {
            return false;
        };

        // (run, first offset, end offset) per touched run, in order
        let mut touched: Vec<(usize, usize, usize)> = Vec::new();
        for span in spans {
            match touched.last_mut() {
                Some(last) if last.0 == span.run => last.2 = span.offset + 1,
                _ => touched.push((span.run, span.offset, span.offset + 1)),
            }
        }

        for (i, (run, from, to)) in touched.into_iter().enumerate() {
            let replacement = if i == 0 { value } else { "" };
            replace_chars(&mut paragraph.runs[run].text, from, to, replacement);
        }

        true
    }
}

/// Replace characters `from..to` of `text`.
fn replace_chars(text: &mut String, from: usize, to: usize, replacement: &str) {
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(b, _)| b)
            .unwrap_or(text.len())
    };
    let range = byte_at(from)..byte_at(to);
    text.replace_range(range, replacement);
}
