//! Zip container access for Office Open XML packages.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};

/// Package-level relationships part.
const ROOT_RELS: &str = "_rels/.rels";
/// Relationship type suffix of the main document part.
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
/// Conventional main part location.
const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// An opened package. Holds its own copy of the input bytes.
pub struct Package {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl Package {
    /// Open a package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let format = detect_format_from_bytes(data)?;
        if format.empty {
            return Err(Error::MissingPart(DEFAULT_MAIN_PART.to_string()));
        }
        let archive = ZipArchive::new(Cursor::new(data.to_vec()))?;
        Ok(Self { archive })
    }

    /// Number of parts in the package.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if the package has no parts.
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Part names in archive order.
    pub fn part_names(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i))
            .map(str::to_string)
            .collect()
    }

    /// Check if a part exists.
    pub fn contains(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Read a part's bytes.
    pub fn read_part(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(name)
            .map_err(|_| Error::MissingPart(name.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read a part as UTF-8 text.
    pub fn read_text_part(&mut self, name: &str) -> Result<String> {
        let data = self.read_part(name)?;
        String::from_utf8(data).map_err(|e| Error::Xml(format!("{}: {}", name, e)))
    }

    /// Locate the main document part.
    ///
    /// Follows the `officeDocument` relationship of the package and falls
    /// back to `word/document.xml`.
    pub fn main_part(&mut self) -> Result<String> {
        if self.contains(ROOT_RELS) {
            let rels = self.read_text_part(ROOT_RELS)?;
            if let Some(target) = office_document_target(&rels)? {
                if self.contains(&target) {
                    return Ok(target);
                }
                log::warn!("Main part {} named in {} is missing", target, ROOT_RELS);
            }
        }

        if self.contains(DEFAULT_MAIN_PART) {
            Ok(DEFAULT_MAIN_PART.to_string())
        } else {
            Err(Error::MissingPart(DEFAULT_MAIN_PART.to_string()))
        }
    }

    /// Write the package back out, replacing the given parts.
    ///
    /// Parts not in `replaced` are copied without recompression, so their
    /// bytes are preserved exactly.
    pub fn write(&mut self, replaced: &HashMap<String, Vec<u8>>) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for i in 0..self.archive.len() {
            let file = self.archive.by_index_raw(i)?;
            let name = file.name().to_string();

            match replaced.get(&name) {
                Some(data) => {
                    let method = match file.compression() {
                        CompressionMethod::Stored => CompressionMethod::Stored,
                        _ => CompressionMethod::Deflated,
                    };
                    drop(file);
                    let options = SimpleFileOptions::default().compression_method(method);
                    writer.start_file(name, options)?;
                    writer.write_all(data)?;
                }
                None => writer.raw_copy_file(file)?,
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Target of the `officeDocument` relationship, without a leading slash.
fn office_document_target(rels: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(rels);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let Some(kind) = e.try_get_attribute("Type")? else {
                    continue;
                };
                if !kind.unescape_value()?.ends_with(OFFICE_DOCUMENT_REL) {
                    continue;
                }
                if let Some(target) = e.try_get_attribute("Target")? {
                    let target = target.unescape_value()?;
                    return Ok(Some(target.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
