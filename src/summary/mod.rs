//! Spreadsheet summaries of filled records.
//!
//! One header row holds the template titles plus a trailing creation-time
//! column; every record becomes one data row with its values in template
//! order.

mod options;
mod xlsx;

pub use options::{SummaryOptions, DEFAULT_DATE_PATTERN};
pub use xlsx::write_xlsx;

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A filled record as seen by the summary.
pub trait RecordView {
    /// Stored value for a template, if any.
    fn value_for(&self, template_id: &str) -> Option<&str>;

    /// When the record was filled.
    fn created_at(&self) -> DateTime<Utc>;
}

/// A template as seen by the summary.
pub trait TemplateView {
    /// Identity used to look up record values.
    fn id(&self) -> &str;

    /// Column header.
    fn display_title(&self) -> &str;
}

/// A filled record: one value per template id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Values keyed by template id
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    /// When the record was filled
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Create an empty record.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            values: BTreeMap::new(),
            created_at,
        }
    }

    /// Builder-style value insertion.
    pub fn with_value(mut self, template_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(template_id.into(), value.into());
        self
    }
}

impl RecordView for Record {
    fn value_for(&self, template_id: &str) -> Option<&str> {
        self.values.get(template_id).map(String::as_str)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A named placeholder definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Identity
    pub id: String,

    /// Display title; the id is used when absent
    #[serde(default)]
    pub title: Option<String>,
}

impl Template {
    /// Create a template whose title is its id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl TemplateView for Template {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// Role of a cell, deciding its font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    /// Bold header cell
    Header,
    /// Plain data cell
    Data,
}

/// Cell values of a summary, before styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySheet {
    /// Header row
    pub header: Vec<String>,

    /// Data rows, one per record
    pub rows: Vec<Vec<String>>,
}

impl SummarySheet {
    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        1 + self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Header followed by data rows.
    pub fn rows_with_header(&self) -> impl Iterator<Item = &Vec<String>> + '_ {
        std::iter::once(&self.header).chain(self.rows.iter())
    }

    /// Value at a zero-based position, header at row 0.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows_with_header()
            .nth(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }
}

/// Builds summary spreadsheets.
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    options: SummaryOptions,
}

impl SummaryBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the given options.
    pub fn with_options(options: SummaryOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Lay out the cell values.
    ///
    /// Fails with [`Error::MissingValue`] on the first record lacking a value
    /// for one of the templates. Values for other templates are ignored.
    pub fn sheet<R, T>(&self, records: &[R], templates: &[T]) -> Result<SummarySheet>
    where
        R: RecordView,
        T: TemplateView,
    {
        let mut header: Vec<String> = templates
            .iter()
            .map(|t| t.display_title().to_string())
            .collect();
        header.push(self.options.filling_date_header.clone());

        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| -> Result<Vec<String>> {
                let mut row = templates
                    .iter()
                    .map(|t| {
                        record
                            .value_for(t.id())
                            .map(str::to_string)
                            .ok_or_else(|| Error::MissingValue {
                                record: index,
                                template: t.id().to_string(),
                            })
                    })
                    .collect::<Result<Vec<String>>>()?;
                row.push(stamp(record.created_at(), &self.options.date_pattern)?);
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SummarySheet { header, rows })
    }

    /// Output filename stem: the title (or the default) plus `now`.
    pub fn filename(&self, title: Option<&str>, now: DateTime<Utc>) -> Result<String> {
        let stem = match title {
            Some(t) if !t.is_empty() => t,
            _ => self.options.default_title.as_str(),
        };
        Ok(format!("{}{}", stem, stamp(now, &self.options.filename_pattern)?))
    }

    /// Build the spreadsheet, naming it after `now`.
    pub fn build_at<R, T>(
        &self,
        records: &[R],
        templates: &[T],
        title: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(Vec<u8>, String)>
    where
        R: RecordView,
        T: TemplateView,
    {
        let filename = self.filename(title, now)?;
        let sheet = self.sheet(records, templates)?;
        let bytes = write_xlsx(&sheet, &self.options)?;
        Ok((bytes, filename))
    }

    /// Build the spreadsheet, naming it after the current time.
    pub fn build<R, T>(
        &self,
        records: &[R],
        templates: &[T],
        title: Option<&str>,
    ) -> Result<(Vec<u8>, String)>
    where
        R: RecordView,
        T: TemplateView,
    {
        self.build_at(records, templates, title, Utc::now())
    }
}

/// Format `time` with a `strftime` pattern.
///
/// Unknown specifiers surface as a formatting error, not at parse time.
fn stamp(time: DateTime<Utc>, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", time.format(pattern))
        .map_err(|_| Error::InvalidPattern(pattern.to_string()))?;
    Ok(out)
}

/// Build a summary spreadsheet with default options.
///
/// Returns the .xlsx bytes and a filename stem made of `title` (or
/// `"document"`) and the current UTC time.
pub fn summarize<R, T>(records: &[R], templates: &[T], title: Option<&str>) -> Result<(Vec<u8>, String)>
where
    R: RecordView,
    T: TemplateView,
{
    SummaryBuilder::new().build(records, templates, title)
}

/// [`summarize`] with an explicit clock.
pub fn summarize_at<R, T>(
    records: &[R],
    templates: &[T],
    title: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(Vec<u8>, String)>
where
    R: RecordView,
    T: TemplateView,
{
    SummaryBuilder::new().build_at(records, templates, title, now)
}

/// Ordered union of template sets, de-duplicated by id.
///
/// Keeps the first occurrence of each id, in first-seen order across sets.
pub fn union_templates<T>(sets: &[Vec<T>]) -> Vec<T>
where
    T: TemplateView + Clone,
{
    let mut seen: Vec<&str> = Vec::new();
    let mut union = Vec::new();

    for template in sets.iter().flatten() {
        if !seen.contains(&template.id()) {
            seen.push(template.id());
            union.push(template.clone());
        }
    }

    union
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, h, 5, 7).unwrap()
    }

    fn templates() -> Vec<Template> {
        vec![
            Template::new("name").with_title("Full name"),
            Template::new("city"),
            Template::new("phone").with_title("Phone"),
        ]
    }

    fn record(h: u32, name: &str) -> Record {
        Record::new(at(h))
            .with_value("name", name)
            .with_value("city", "Oslo")
            .with_value("phone", "555")
    }

    #[test]
    fn test_sheet_shape() {
        let records = vec![record(1, "Ann"), record(2, "Bob")];
        let sheet = SummaryBuilder::new().sheet(&records, &templates()).unwrap();

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), 4);
        assert_eq!(
            sheet.header,
            vec!["Full name", "city", "Phone", "filling date"]
        );
        assert_eq!(sheet.rows[0], vec!["Ann", "Oslo", "555", "2024_03_09_01_05_07"]);
        assert_eq!(sheet.cell(2, 3), Some("2024_03_09_02_05_07"));
        assert_eq!(sheet.cell(3, 0), None);
    }

    #[test]
    fn test_missing_value_fails() {
        let records = vec![
            record(1, "Ann"),
            Record::new(at(2)).with_value("name", "Bob").with_value("phone", "1"),
        ];
        let result = SummaryBuilder::new().sheet(&records, &templates());

        match result {
            Err(Error::MissingValue { record, template }) => {
                assert_eq!(record, 1);
                assert_eq!(template, "city");
            }
            other => panic!("expected missing value, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_values_are_ignored() {
        let records = vec![record(1, "Ann").with_value("unused", "x")];
        let sheet = SummaryBuilder::new().sheet(&records, &templates()).unwrap();
        assert_eq!(sheet.column_count(), 4);
        assert!(!sheet.rows[0].contains(&"x".to_string()));
    }

    #[test]
    fn test_no_records_gives_header_only() {
        let records: Vec<Record> = Vec::new();
        let sheet = SummaryBuilder::new().sheet(&records, &templates()).unwrap();
        assert_eq!(sheet.row_count(), 1);
    }

    #[test]
    fn test_filename() {
        let builder = SummaryBuilder::new();
        assert_eq!(
            builder.filename(Some("Lease"), at(13)).unwrap(),
            "Lease2024_03_09_13_05_07"
        );
        assert_eq!(
            builder.filename(Some(""), at(13)).unwrap(),
            "document2024_03_09_13_05_07"
        );
        assert_eq!(
            builder.filename(None, at(13)).unwrap(),
            "document2024_03_09_13_05_07"
        );
    }

    #[test]
    fn test_invalid_patterns_are_errors() {
        let records = vec![record(1, "Ann")];

        let builder = SummaryBuilder::with_options(SummaryOptions::new().with_date_pattern("%Q"));
        assert!(matches!(
            builder.sheet(&records, &templates()),
            Err(Error::InvalidPattern(ref p)) if p == "%Q"
        ));

        let builder =
            SummaryBuilder::with_options(SummaryOptions::new().with_filename_pattern("_%Q"));
        assert!(matches!(
            builder.filename(None, at(1)),
            Err(Error::InvalidPattern(_))
        ));
        assert!(matches!(
            builder.build_at(&records, &templates(), None, at(1)),
            Err(Error::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_summarize_at() {
        let records = vec![record(1, "Ann")];
        let (bytes, filename) = summarize_at(&records, &templates(), Some("pkg"), at(4)).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert_eq!(filename, "pkg2024_03_09_04_05_07");
    }

    #[test]
    fn test_union_templates() {
        let sets = vec![
            vec![Template::new("a"), Template::new("b")],
            vec![Template::new("b").with_title("other"), Template::new("c")],
        ];
        let union = union_templates(&sets);
        let ids: Vec<&str> = union.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(union[1].display_title(), "b");
    }

    #[test]
    fn test_record_from_json() {
        let record: Record = serde_json::from_str(
            r#"{"values": {"name": "Ann"}, "created_at": "2024-03-09T01:05:07Z"}"#,
        )
        .unwrap();
        assert_eq!(record.value_for("name"), Some("Ann"));
        assert_eq!(RecordView::created_at(&record), at(1));
    }
}
