//! .docx parsing module.

mod body;
mod docx_parser;
mod package;

pub use body::parse_body;
pub use docx_parser::DocxParser;
pub use package::Package;
