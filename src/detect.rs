//! .docx format detection and validation.

use crate::error::{Error, Result};
use crate::parser::Package;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Container format information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFormat {
    /// Whether the archive declares no entries (end-of-central-directory only)
    pub empty: bool,
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.empty {
            write!(f, "empty ZIP container")
        } else {
            write!(f, "ZIP container")
        }
    }
}

/// Local file header signature: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// End of central directory signature of an archive without entries.
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";
const ZIP_MAGIC_LEN: usize = 4;

/// Detect the container format from a file path.
///
/// # Example
/// ```no_run
/// use docfill::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("contract.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ContainerFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; ZIP_MAGIC_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|_| Error::UnknownFormat)?;
    detect_format_from_bytes(&header)
}

/// Detect the container format from the leading bytes of a file.
///
/// Only the header is inspected; use [`is_docx_bytes`] to also check that a
/// main document part is present.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ContainerFormat> {
    if data.len() < ZIP_MAGIC_LEN {
        return Err(Error::UnknownFormat);
    }

    if data.starts_with(ZIP_MAGIC) {
        Ok(ContainerFormat { empty: false })
    } else if data.starts_with(ZIP_EMPTY_MAGIC) {
        Ok(ContainerFormat { empty: true })
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if a file is a wordprocessing package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    std::fs::read(path).map(|data| is_docx_bytes(&data)).unwrap_or(false)
}

/// Check if bytes hold a wordprocessing package with a readable main part.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    match detect_format_from_bytes(data) {
        Ok(format) if !format.empty => Package::from_bytes(data)
            .map(|mut package| package.main_part().is_ok())
            .unwrap_or(false),
        _ => false,
    }
}
