//! Document-level types and paragraph traversal.

use super::{Paragraph, Table};
use crate::error::Result;
use crate::format::TokenSyntax;
use serde::{Deserialize, Serialize};

/// The body of a wordprocessing document.
///
/// Top-level paragraphs and top-level tables are kept in two separate
/// sequences; their relative interleaving in the source is not modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Paragraphs that are direct children of the body
    pub paragraphs: Vec<Paragraph>,

    /// Tables that are direct children of the body
    pub tables: Vec<Table>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Add a top-level table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Iterate over every searchable paragraph.
    ///
    /// Yields all top-level paragraphs, then for each table, row and cell the
    /// paragraphs of that cell. Tables nested inside cells are not visited.
    /// The iterator is lazy; call again to restart.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> + '_ {
        self.paragraphs.iter().chain(
            self.tables
                .iter()
                .flat_map(|table| table.rows.iter())
                .flat_map(|row| row.cells.iter())
                .flat_map(|cell| cell.paragraphs.iter()),
        )
    }

    /// Mutable counterpart of [`Document::paragraphs`], same order.
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> + '_ {
        self.paragraphs.iter_mut().chain(
            self.tables
                .iter_mut()
                .flat_map(|table| table.rows.iter_mut())
                .flat_map(|row| row.cells.iter_mut())
                .flat_map(|cell| cell.paragraphs.iter_mut()),
        )
    }

    /// Number of paragraphs visited by [`Document::paragraphs`].
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Check if the document has no paragraphs and no tables.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }

    /// Check if any run text changed since parsing.
    pub fn is_modified(&self) -> bool {
        self.paragraphs().any(Paragraph::is_modified)
    }

    /// Get plain text content, one line per visited paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Distinct well-formed tokens present in the document, first-seen order.
    ///
    /// Tokens split across runs are found, since each paragraph is searched
    /// as a whole.
    pub fn placeholders(&self, syntax: &TokenSyntax) -> Result<Vec<String>> {
        let pattern = syntax.pattern()?;
        let mut found: Vec<String> = Vec::new();

        for paragraph in self.paragraphs() {
            let text = paragraph.text();
            for m in pattern.find_iter(&text) {
                if !found.iter().any(|t| t == m.as_str()) {
                    found.push(m.as_str().to_string());
                }
            }
        }

        Ok(found)
    }
}
