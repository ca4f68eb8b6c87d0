//! Rendering module for writing documents back out.

mod docx;
mod json;

pub use docx::{splice_runs, DocxWriter};
pub use json::{to_json, JsonFormat};
