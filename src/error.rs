//! Error types for docfill library.

use std::io;
use thiserror::Error;

/// Result type alias for docfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while filling documents or building summaries.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a wordprocessing package.
    #[error("Unknown file format: not a valid .docx document")]
    UnknownFormat,

    /// The zip container could not be read or written.
    #[error("Archive error: {0}")]
    Zip(String),

    /// A package part contains malformed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// A token is empty or does not match the configured syntax.
    #[error("Invalid token {token:?}: {reason}")]
    InvalidToken {
        /// The rejected token
        token: String,
        /// Why it was rejected
        reason: String,
    },

    /// A paragraph kept producing matches past the configured cap.
    #[error("Token {token:?} was replaced more than {limit} times in one paragraph")]
    ReplacementLimit {
        /// The token being substituted
        token: String,
        /// The configured cap
        limit: usize,
    },

    /// A record has no value for a template required by the summary.
    #[error("Record {record} has no value for template {template:?}")]
    MissingValue {
        /// Zero-based position of the record in the input
        record: usize,
        /// Id of the template without a value
        template: String,
    },

    /// A date pattern contains an unknown `strftime` specifier.
    #[error("Invalid date pattern: {0:?}")]
    InvalidPattern(String),

    /// Error building or writing the spreadsheet.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(
            err.to_string(),
            "Unknown file format: not a valid .docx document"
        );

        let err = Error::MissingValue {
            record: 1,
            template: "Name".to_string(),
        };
        assert_eq!(err.to_string(), "Record 1 has no value for template \"Name\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::InvalidArchive("bad".into()).into();
        assert!(matches!(err, Error::Zip(_)));

        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::MissingPart(_)));
    }
}
