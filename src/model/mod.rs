//! Document model for wordprocessing content.
//!
//! The model keeps only what placeholder substitution needs: paragraphs made
//! of styled runs, and tables whose cells hold paragraphs. Everything else in
//! the source XML is carried through untouched by the writer.

mod document;
mod paragraph;
mod table;

pub use document::Document;
pub(crate) use paragraph::TextSlot;
pub use paragraph::{Paragraph, Run, RunStyle};
pub use table::{Table, TableCell, TableRow};
