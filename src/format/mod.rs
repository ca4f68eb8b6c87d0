//! Document formatting: parse, substitute, write back.

mod options;

pub use options::{FormatOptions, TokenSyntax, DEFAULT_POSTFIX, DEFAULT_PREFIX};

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::DocxParser;
use crate::render::DocxWriter;
use crate::substitute::{ParagraphSubstitutor, Substitutions};

/// Fills placeholder tokens in .docx documents.
///
/// # Example
///
/// ```no_run
/// use docfill::format::DocumentFormatter;
/// use docfill::substitute::Substitutions;
///
/// let subs = Substitutions::new().with("{{name}}", "World");
/// let data = std::fs::read("letter.docx")?;
/// let filled = DocumentFormatter::new().format_bytes(&data, &subs)?;
/// std::fs::write("letter_filled.docx", filled)?;
/// # Ok::<(), docfill::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentFormatter {
    options: FormatOptions,
}

impl DocumentFormatter {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Validate tokens against the configured syntax before formatting.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Disable parallel package formatting.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set the token syntax.
    pub fn with_syntax(mut self, syntax: TokenSyntax) -> Self {
        self.options = self.options.with_syntax(syntax);
        self
    }

    /// Current options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Fill a document given as bytes. The input is not modified.
    pub fn format_bytes(&self, data: &[u8], subs: &Substitutions) -> Result<Vec<u8>> {
        self.check_tokens(subs)?;

        let parser = DocxParser::from_bytes(data)?;
        let mut document = parser.parse()?;
        let replaced = self.format_document(&mut document, subs)?;
        log::debug!("Replaced {} token occurrences", replaced);

        DocxWriter::new(parser).write(&document)
    }

    /// Fill a document file.
    pub fn format_file<P: AsRef<Path>>(&self, path: P, subs: &Substitutions) -> Result<Vec<u8>> {
        let path = path.as_ref();
        crate::detect::detect_format_from_path(path)?;
        let data = std::fs::read(path)?;
        self.format_bytes(&data, subs)
    }

    /// Fill a document read from a reader.
    pub fn format_reader<R: Read>(&self, mut reader: R, subs: &Substitutions) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.format_bytes(&data, subs)
    }

    /// Substitute every token in an already parsed document.
    ///
    /// Each paragraph gets every (token, value) pair in order. Returns the
    /// total number of replacements.
    pub fn format_document(&self, document: &mut Document, subs: &Substitutions) -> Result<usize> {
        self.check_tokens(subs)?;

        let substitutor = ParagraphSubstitutor::new().with_limit(self.options.max_replacements);
        let mut total = 0;

        for paragraph in document.paragraphs_mut() {
            for (token, value) in subs.iter() {
                total += substitutor.substitute(paragraph, token, value)?;
            }
        }

        Ok(total)
    }

    /// Fill several independent documents with the same substitutions.
    ///
    /// Each entry is `(name, bytes)`; the output keeps names and order. The
    /// first failing document fails the whole call.
    pub fn format_package(
        &self,
        documents: &[(String, Vec<u8>)],
        subs: &Substitutions,
    ) -> Result<Vec<(String, Vec<u8>)>> {
        self.check_tokens(subs)?;

        let fill = |(name, data): &(String, Vec<u8>)| -> Result<(String, Vec<u8>)> {
            log::debug!("Formatting {}", name);
            let filled = self.format_bytes(data, subs)?;
            Ok((name.clone(), filled))
        };

        if self.options.parallel {
            documents.par_iter().map(fill).collect()
        } else {
            documents.iter().map(fill).collect()
        }
    }

    /// Fill a document file without blocking the async runtime.
    #[cfg(feature = "async")]
    pub async fn format_file_async<P: AsRef<Path>>(
        &self,
        path: P,
        subs: &Substitutions,
    ) -> Result<Vec<u8>> {
        let data = tokio::fs::read(path.as_ref()).await?;
        let formatter = self.clone();
        let subs = subs.clone();

        tokio::task::spawn_blocking(move || formatter.format_bytes(&data, &subs))
            .await
            .map_err(|e| Error::Other(format!("formatting task failed: {}", e)))?
    }

    fn check_tokens(&self, subs: &Substitutions) -> Result<()> {
        for token in subs.tokens() {
            if token.is_empty() {
                return Err(Error::InvalidToken {
                    token: String::new(),
                    reason: "token is empty".to_string(),
                });
            }
            if self.options.strict_tokens {
                self.options.syntax.validate(token)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Run, Table, TableRow};

    fn letter() -> Document {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_runs(vec![
            Run::new("Dear {{na"),
            Run::new("me}}, "),
            Run::new("welcome to {{city}}."),
        ]));
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["{{name}}", "{{city}}"]));
        doc.add_table(table);
        doc
    }

    #[test]
    fn test_format_document_fills_paragraphs_and_cells() {
        let mut doc = letter();
        let subs = Substitutions::new()
            .with("{{name}}", "Ann")
            .with("{{city}}", "Oslo");

        let count = DocumentFormatter::new()
            .format_document(&mut doc, &subs)
            .unwrap();

        assert_eq!(count, 4);
        assert_eq!(doc.plain_text(), "Dear Ann, welcome to Oslo.\nAnn\nOslo");
        assert_eq!(doc.paragraphs[0].runs[0].text, "Dear Ann");
        assert_eq!(doc.paragraphs[0].runs[1].text, ", ");
    }

    #[test]
    fn test_substitutions_apply_in_order() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("{{a}}"));
        let subs = Substitutions::new().with("{{a}}", "{{b}}").with("{{b}}", "x");

        DocumentFormatter::new()
            .format_document(&mut doc, &subs)
            .unwrap();
        assert_eq!(doc.plain_text(), "x");
    }

    #[test]
    fn test_absent_token_is_noop() {
        let mut doc = letter();
        let before = doc.plain_text();
        let subs = Substitutions::new().with("{{missing}}", "x");

        let count = DocumentFormatter::new()
            .format_document(&mut doc, &subs)
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(doc.plain_text(), before);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let mut doc = letter();
        let subs = Substitutions::new().with("", "x");
        let result = DocumentFormatter::new().format_document(&mut doc, &subs);
        assert!(matches!(result, Err(Error::InvalidToken { .. })));
    }

    #[test]
    fn test_strict_mode_validates_tokens() {
        let mut doc = letter();
        let subs = Substitutions::new().with("name", "x");

        assert!(DocumentFormatter::new()
            .format_document(&mut doc, &subs)
            .is_ok());

        let result = DocumentFormatter::new()
            .strict()
            .format_document(&mut doc, &subs);
        assert!(matches!(result, Err(Error::InvalidToken { .. })));
    }

    #[test]
    fn test_replacement_cap() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("{{a}} {{a}} {{a}}"));
        let subs = Substitutions::new().with("{{a}}", "x");

        let formatter =
            DocumentFormatter::with_options(FormatOptions::new().with_max_replacements(2));
        let result = formatter.format_document(&mut doc, &subs);
        assert!(matches!(
            result,
            Err(Error::ReplacementLimit { limit: 2, .. })
        ));
    }

    #[test]
    fn test_format_bytes_rejects_garbage() {
        let subs = Substitutions::new();
        let result = DocumentFormatter::new().format_bytes(b"not a docx", &subs);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_format_package_propagates_errors() {
        let subs = Substitutions::new();
        let docs = vec![("bad.docx".to_string(), b"nope".to_vec())];

        let result = DocumentFormatter::new().sequential().format_package(&docs, &subs);
        assert!(result.is_err());

        let empty = DocumentFormatter::new().format_package(&[], &subs).unwrap();
        assert!(empty.is_empty());
    }
}
