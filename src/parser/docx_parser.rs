//! .docx document parser.

use std::io::Read;
use std::path::Path;

use crate::detect::detect_format_from_path;
use crate::error::Result;
use crate::model::Document;

use super::body::parse_body;
use super::package::Package;

/// .docx document parser.
///
/// Keeps the opened package and the main part XML so that a
/// [`DocxWriter`](crate::render::DocxWriter) can write the document back.
pub struct DocxParser {
    package: Package,
    main_part: String,
    xml: String,
}

impl DocxParser {
    /// Open a .docx file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a .docx from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut package = Package::from_bytes(data)?;
        let main_part = package.main_part()?;
        let xml = package.read_text_part(&main_part)?;
        log::debug!("Main document part: {} ({} bytes)", main_part, xml.len());

        Ok(Self {
            package,
            main_part,
            xml,
        })
    }

    /// Parse a .docx from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse the main part into a [`Document`].
    pub fn parse(&self) -> Result<Document> {
        parse_body(&self.xml)
    }

    /// Name of the main document part.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Main document part XML as read from the package.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Part names in archive order.
    pub fn part_names(&self) -> Vec<String> {
        self.package.part_names()
    }

    pub(crate) fn into_parts(self) -> (Package, String, String) {
        (self.package, self.main_part, self.xml)
    }
}
