//! Paragraph and run-level types.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A paragraph: an ordered sequence of runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs in document order
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from runs.
    pub fn with_runs(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Create a paragraph holding one unstyled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_runs(vec![Run::new(text)])
    }

    /// Append a run.
    pub fn add_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs.
    ///
    /// This is the only text searched for tokens.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Get the number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Check if the paragraph has no text at all.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Run::is_empty)
    }

    /// Check if any run text differs from what was parsed.
    pub fn is_modified(&self) -> bool {
        self.runs.iter().any(Run::is_modified)
    }
}

/// A span of text sharing one formatting style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// The text content
    pub text: String,

    /// Formatting handle, never altered by substitution
    pub style: RunStyle,

    /// Where the text came from in the source part
    #[serde(skip)]
    pub(crate) origin: Option<RunOrigin>,
}

impl Run {
    /// Create a new run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
            origin: None,
        }
    }

    /// Create a run with a style handle.
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            origin: None,
        }
    }

    pub(crate) fn parsed(text: String, style: RunStyle, slots: Vec<TextSlot>) -> Self {
        Self {
            origin: Some(RunOrigin {
                slots,
                text: text.clone(),
            }),
            text,
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the text was changed since parsing.
    ///
    /// Runs built in memory have no origin and always report `false`.
    pub fn is_modified(&self) -> bool {
        self.origin
            .as_ref()
            .is_some_and(|origin| origin.text != self.text)
    }
}

/// Opaque formatting handle of a run.
///
/// Holds the raw run-properties markup (`<w:rPr>...</w:rPr>`) when the run
/// was parsed from a document. Substitution never touches it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunStyle(Option<String>);

impl RunStyle {
    /// Create a style handle from raw properties markup.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self(Some(markup.into()))
    }

    /// Raw properties markup, if the run had any.
    pub fn markup(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Check if the run inherits paragraph formatting only.
    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }
}

/// Source location of a parsed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunOrigin {
    /// Text elements of the run, in order
    pub(crate) slots: Vec<TextSlot>,
    /// Text as parsed
    pub(crate) text: String,
}

/// One `w:t` element: byte range of the whole element plus its tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextSlot {
    pub(crate) element: Range<usize>,
    pub(crate) qname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let p = Paragraph::with_runs(vec![Run::new("Hello "), Run::new("{{na"), Run::new("me}}")]);
        assert_eq!(p.text(), "Hello {{name}}");
        assert_eq!(p.run_count(), 3);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_empty_paragraph() {
        let p = Paragraph::new();
        assert_eq!(p.text(), "");
        assert!(p.is_empty());

        let p = Paragraph::with_runs(vec![Run::new(""), Run::new("")]);
        assert!(p.is_empty());
    }

    #[test]
    fn test_in_memory_run_is_never_modified() {
        let mut run = Run::new("a");
        run.text.push('b');
        assert!(!run.is_modified());
    }

    #[test]
    fn test_parsed_run_tracks_modification() {
        let mut run = Run::parsed("abc".to_string(), RunStyle::default(), Vec::new());
        assert!(!run.is_modified());
        run.text = "abd".to_string();
        assert!(run.is_modified());
        run.text = "abc".to_string();
        assert!(!run.is_modified());
    }

    #[test]
    fn test_run_style_handle() {
        let style = RunStyle::from_markup("<w:rPr><w:b/></w:rPr>");
        assert_eq!(style.markup(), Some("<w:rPr><w:b/></w:rPr>"));
        assert!(!style.is_default());
        assert!(RunStyle::default().is_default());
    }
}
