// ============================================================
// SPREADSHEET PARSER
// ============================================================
// Decode an in-memory spreadsheet container into the tabular model

use crate::domain::error::{AppError, Result};
use crate::domain::table::{format_number, CellValue, Row, SpreadsheetDocument};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use tracing::debug;

/// The file types the importer accepts, matched case-insensitively.
pub fn has_supported_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// Decode `bytes` as a spreadsheet and model its first sheet: row 0 as
/// headers (whatever it contains), the rest as data rows. An empty sheet
/// yields an empty document; an undecodable container is a format error.
pub fn parse(bytes: &[u8]) -> Result<SpreadsheetDocument> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AppError::Format(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| AppError::Format(e.to_string()))?,
        None => {
            return Err(AppError::Format(
                "workbook contains no worksheets".to_string(),
            ))
        }
    };

    let mut sheet_rows = range.rows();

    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return Ok(SpreadsheetDocument::default()),
    };

    let rows: Vec<Row> = sheet_rows.map(data_row).collect();

    debug!(
        headers = headers.len(),
        rows = rows.len(),
        "parsed first sheet"
    );

    Ok(SpreadsheetDocument { headers, rows })
}

/// Header cells are kept as plain text; blanks stay empty strings.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => format_number(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => format_number(v.as_f64()),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(v) => CellValue::Text(v.to_string()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Text(v.to_string()),
        Data::DateTime(v) => CellValue::Number(v.as_f64()),
        Data::DateTimeIso(v) => CellValue::Text(v.to_string()),
        Data::DurationIso(v) => CellValue::Text(v.to_string()),
        Data::Error(v) => CellValue::Text(format!("{v:?}")),
    }
}

/// The container pads short rows to the sheet width; trailing padding is
/// absence, not data, so it is trimmed off the model.
fn data_row(cells: &[Data]) -> Row {
    let mut row: Row = cells.iter().map(cell_value).collect();
    while matches!(row.last(), Some(CellValue::Null)) {
        row.pop();
    }
    row
}
