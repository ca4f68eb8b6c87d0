//! Summary spreadsheet options.

use serde::{Deserialize, Serialize};

/// Default `strftime` pattern for timestamps in cells and filenames.
pub const DEFAULT_DATE_PATTERN: &str = "%Y_%m_%d_%H_%M_%S";

/// Options controlling the summary sheet layout and naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Pattern for the trailing creation-time column
    pub date_pattern: String,

    /// Pattern for the timestamp appended to the filename
    pub filename_pattern: String,

    /// Header of the trailing creation-time column
    pub filling_date_header: String,

    /// Name of the single worksheet
    pub sheet_name: String,

    /// Filename stem used when no title is given
    pub default_title: String,
}

impl SummaryOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creation-time cell pattern.
    pub fn with_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_pattern = pattern.into();
        self
    }

    /// Set the filename timestamp pattern.
    pub fn with_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filename_pattern = pattern.into();
        self
    }

    /// Set the trailing column header.
    pub fn with_filling_date_header(mut self, header: impl Into<String>) -> Self {
        self.filling_date_header = header.into();
        self
    }

    /// Set the worksheet name.
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Set the fallback filename stem.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            filename_pattern: DEFAULT_DATE_PATTERN.to_string(),
            filling_date_header: "filling date".to_string(),
            sheet_name: "Sheet1".to_string(),
            default_title: "document".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SummaryOptions::default();
        assert_eq!(options.date_pattern, "%Y_%m_%d_%H_%M_%S");
        assert_eq!(options.filling_date_header, "filling date");
        assert_eq!(options.default_title, "document");
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let options: SummaryOptions =
            serde_json::from_str(r#"{"filling_date_header": "Filled"}"#).unwrap();
        assert_eq!(options.filling_date_header, "Filled");
        assert_eq!(options.sheet_name, "Sheet1");
    }
}
