//! # docfill
//!
//! Placeholder substitution for .docx documents, plus spreadsheet
//! summaries of filled records.
//!
//! Tokens such as `{{name}}` may be split across several formatting runs.
//! They are found in the joined paragraph text and rewritten run by run, so
//! the formatting of every surrounding character is kept.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfill::{format_file, Substitutions};
//!
//! fn main() -> docfill::Result<()> {
//!     let subs = Substitutions::new()
//!         .with("{{name}}", "Ann Smith")
//!         .with("{{city}}", "Oslo");
//!
//!     let filled = format_file("letter.docx", &subs)?;
//!     std::fs::write("letter_filled.docx", filled)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Run-preserving substitution**: styles of untouched characters never change
//! - **Tables**: paragraphs inside top-level table cells are filled too
//! - **Minimal rewrite**: only changed text elements are rewritten; other parts are copied byte for byte
//! - **Summaries**: records to .xlsx with one column per template
//! - **Parallel processing**: uses Rayon for multi-document packages

pub mod detect;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod render;
pub mod substitute;
pub mod summary;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, ContainerFormat};
pub use error::{Error, Result};
pub use format::{DocumentFormatter, FormatOptions, TokenSyntax};
pub use model::{Document, Paragraph, Run, RunStyle, Table, TableCell, TableRow};
pub use parser::DocxParser;
pub use render::JsonFormat;
pub use substitute::{Substitutions, TemplateValue};
pub use summary::{
    summarize, summarize_at, Record, RecordView, SummaryBuilder, SummaryOptions, Template,
    TemplateView,
};

use std::io::Read;
use std::path::Path;

/// Fill placeholder tokens in a .docx given as bytes.
///
/// Every (token, value) pair is applied to every paragraph, in order.
/// Tokens absent from the document are ignored.
///
/// # Example
///
/// ```no_run
/// use docfill::{format, Substitutions};
///
/// let data = std::fs::read("letter.docx").unwrap();
/// let subs = Substitutions::new().with("{{name}}", "World");
/// let filled = format(&data, &subs).unwrap();
/// ```
pub fn format(document: &[u8], substitutions: &Substitutions) -> Result<Vec<u8>> {
    DocumentFormatter::new().format_bytes(document, substitutions)
}

/// Fill placeholder tokens in a .docx with custom options.
pub fn format_with_options(
    document: &[u8],
    substitutions: &Substitutions,
    options: FormatOptions,
) -> Result<Vec<u8>> {
    DocumentFormatter::with_options(options).format_bytes(document, substitutions)
}

/// Fill placeholder tokens in a .docx file.
pub fn format_file<P: AsRef<Path>>(path: P, substitutions: &Substitutions) -> Result<Vec<u8>> {
    DocumentFormatter::new().format_file(path, substitutions)
}

/// Fill placeholder tokens in a .docx read from a reader.
///
/// # Example
///
/// ```no_run
/// use docfill::{format_reader, Substitutions};
/// use std::fs::File;
///
/// let file = File::open("letter.docx").unwrap();
/// let filled = format_reader(file, &Substitutions::new()).unwrap();
/// ```
pub fn format_reader<R: Read>(reader: R, substitutions: &Substitutions) -> Result<Vec<u8>> {
    DocumentFormatter::new().format_reader(reader, substitutions)
}

/// Parse a .docx file into its paragraph/run/table model.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocxParser::open(path)?.parse()
}

/// Parse a .docx from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocxParser::from_bytes(data)?.parse()
}

/// Distinct placeholder tokens in a .docx, in first-seen order.
///
/// # Example
///
/// ```no_run
/// use docfill::{placeholders, TokenSyntax};
///
/// let data = std::fs::read("letter.docx").unwrap();
/// for token in placeholders(&data, &TokenSyntax::default()).unwrap() {
///     println!("{}", token);
/// }
/// ```
pub fn placeholders(data: &[u8], syntax: &TokenSyntax) -> Result<Vec<String>> {
    parse_bytes(data)?.placeholders(syntax)
}

/// Convert a .docx to a JSON dump of its model.
pub fn to_json(data: &[u8], format: JsonFormat) -> Result<String> {
    let doc = parse_bytes(data)?;
    render::to_json(&doc, format)
}
