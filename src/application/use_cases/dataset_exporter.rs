//! Delimited-text export of the de-duplicated dataset.

use crate::domain::table::{DuplicateIndexSet, Row};
use tracing::info;

/// Serializes headers plus every row that did not participate in any
/// duplication. All copies of a duplicated row are dropped, not just the
/// extras.
pub struct DatasetExporter {
    delimiter: char,
}

impl Default for DatasetExporter {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl DatasetExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Header line, then one line per surviving row, joined by `\n`.
    /// A cell is quoted iff its string form contains the delimiter, so the
    /// unquoted cells stay readable for a naive split-on-delimiter reader.
    pub fn export(
        &self,
        rows: &[Row],
        headers: &[String],
        duplicates: &DuplicateIndexSet,
    ) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 1);

        lines.push(self.line(headers.iter().map(|h| h.to_string())));

        let mut kept = 0usize;
        for (index, row) in rows.iter().enumerate() {
            if duplicates.contains(&index) {
                continue;
            }
            kept += 1;
            lines.push(self.line(row.iter().map(|cell| cell.to_string())));
        }

        info!(
            kept_rows = kept,
            dropped_rows = rows.len() - kept,
            "exported cleaned dataset"
        );

        lines.join("\n")
    }

    fn line(&self, cells: impl Iterator<Item = String>) -> String {
        cells
            .map(|cell| {
                if cell.contains(self.delimiter) {
                    format!("\"{}\"", cell)
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>()
            .join(&self.delimiter.to_string())
    }
}

/// Download name for a cleaned export: `cleaned_<stem>.csv`.
pub fn export_file_name(original: &str) -> String {
    let stem = match original.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => original,
    };
    format!("cleaned_{}.csv", stem)
}
