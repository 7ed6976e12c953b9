// ============================================================
// TABULAR DOMAIN LAYER
// ============================================================
// In-memory model for one imported spreadsheet
// No I/O, no async, no external dependencies

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single cell of an imported sheet.
///
/// Serializes untagged, so a row becomes a plain JSON array of
/// string / number / null values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    /// The "string form" of a cell: what export and search operate on.
    /// Null renders as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Null => Ok(()),
        }
    }
}

/// Render a numeric cell without a spurious fractional part: `2.0` prints
/// as `2`, `2.5` as `2.5`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One data row. May be shorter than the header row; trailing absent
/// cells are trimmed at parse time rather than padded.
pub type Row = Vec<CellValue>;

/// Indices of every row participating in at least one exact duplication,
/// first occurrences included.
pub type DuplicateIndexSet = HashSet<usize>;

/// Canonical, order- and type-preserving serialization of a row, used as
/// the duplicate-equality key. `Text("1")` and `Number(1.0)` produce
/// different signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowSignature(String);

impl RowSignature {
    pub fn of(row: &[CellValue]) -> Self {
        let mut out = String::from("[");
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            match cell {
                CellValue::Text(s) => {
                    out.push_str(&serde_json::Value::String(s.clone()).to_string())
                }
                CellValue::Number(n) if n.is_finite() => out.push_str(&format_number(*n)),
                // JSON has no representation for non-finite numbers
                CellValue::Number(_) | CellValue::Null => out.push_str("null"),
            }
        }
        out.push(']');
        RowSignature(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The in-memory model of one spreadsheet file: row 0 of the first sheet
/// as headers, everything below as data rows. Built once per file
/// selection and discarded on reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpreadsheetDocument {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl SpreadsheetDocument {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
