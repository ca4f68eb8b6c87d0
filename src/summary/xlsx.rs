//! Spreadsheet output via umya-spreadsheet.

use std::io::Cursor;

use umya_spreadsheet::{Spreadsheet, Worksheet};

use super::{CellRole, SummaryOptions, SummarySheet};
use crate::error::{Error, Result};

const FONT_NAME: &str = "Times New Roman";
const FONT_SIZE: f64 = 12.0;
const DATA_COLOR: &str = "FF000000";

/// Render a summary sheet as .xlsx bytes.
pub fn write_xlsx(summary: &SummarySheet, options: &SummaryOptions) -> Result<Vec<u8>> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or_else(|| Error::Spreadsheet("new workbook has no sheet".to_string()))?;
    if options.sheet_name != "Sheet1" {
        sheet.set_name(options.sheet_name.as_str());
    }

    for (row, values) in summary.rows_with_header().enumerate() {
        let role = if row == 0 {
            CellRole::Header
        } else {
            CellRole::Data
        };
        for (col, value) in values.iter().enumerate() {
            put_cell(sheet, col as u32 + 1, row as u32 + 1, value, role);
        }
    }

    log::debug!(
        "Writing summary sheet with {} rows and {} columns",
        summary.row_count(),
        summary.column_count()
    );
    to_bytes(&book)
}

fn put_cell(sheet: &mut Worksheet, col: u32, row: u32, value: &str, role: CellRole) {
    let cell = sheet.get_cell_mut((col, row));
    cell.set_value_string(value);

    let font = cell.get_style_mut().get_font_mut();
    font.set_name(FONT_NAME);
    font.set_size(FONT_SIZE);
    match role {
        CellRole::Header => {
            font.set_bold(true);
        }
        CellRole::Data => {
            font.set_bold(false);
            font.get_color_mut().set_argb(DATA_COLOR);
        }
    }
}

fn to_bytes(book: &Spreadsheet) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut cursor)
        .map_err(|e| Error::Spreadsheet(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SummarySheet {
        SummarySheet {
            header: vec!["Name".to_string(), "filling date".to_string()],
            rows: vec![vec!["Ann".to_string(), "2024_01_02_03_04_05".to_string()]],
        }
    }

    #[test]
    fn test_write_xlsx_round_trip() {
        let bytes = write_xlsx(&sample(), &SummaryOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));

        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
        let sheet = book.get_sheet_by_name("Sheet1").unwrap();
        assert_eq!(sheet.get_value("A1"), "Name");
        assert_eq!(sheet.get_value("B1"), "filling date");
        assert_eq!(sheet.get_value("A2"), "Ann");
        assert_eq!(sheet.get_value("B2"), "2024_01_02_03_04_05");
    }

    #[test]
    fn test_numeric_looking_values_stay_text() {
        let summary = SummarySheet {
            header: vec!["Code".to_string()],
            rows: vec![vec!["007".to_string()]],
        };
        let bytes = write_xlsx(&summary, &SummaryOptions::default()).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
        let sheet = book.get_sheet_by_name("Sheet1").unwrap();
        assert_eq!(sheet.get_value("A2"), "007");
    }

    #[test]
    fn test_custom_sheet_name() {
        let options = SummaryOptions::new().with_sheet_name("Records");
        let bytes = write_xlsx(&sample(), &options).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
        assert!(book.get_sheet_by_name("Records").is_some());
    }
}
