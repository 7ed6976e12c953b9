//! Exact-duplicate detection over imported rows.
//!
//! A row is a duplicate of another iff their canonical signatures are
//! equal. Both the first occurrence and every later copy are reported;
//! there is no canonical surviving copy.

use crate::domain::table::{DuplicateIndexSet, Row, RowSignature};
use std::collections::HashMap;
use tracing::debug;

/// Single pass over the rows: remember the first index seen per signature,
/// and on a repeat add both the stored index and the current one.
pub fn detect(rows: &[Row]) -> DuplicateIndexSet {
    let mut first_seen: HashMap<RowSignature, usize> = HashMap::with_capacity(rows.len());
    let mut duplicates = DuplicateIndexSet::new();

    for (index, row) in rows.iter().enumerate() {
        let signature = RowSignature::of(row);
        match first_seen.get(&signature) {
            Some(&first) => {
                duplicates.insert(first);
                duplicates.insert(index);
            }
            None => {
                first_seen.insert(signature, index);
            }
        }
    }

    if !duplicates.is_empty() {
        debug!(
            duplicate_rows = duplicates.len(),
            total_rows = rows.len(),
            "found duplicate rows"
        );
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn num(n: f64) -> CellValue {
        CellValue::Number(n)
    }

    #[test]
    fn test_no_duplicates() {
        let rows = vec![vec![text("A"), num(1.0)], vec![text("B"), num(2.0)]];
        assert!(detect(&rows).is_empty());
    }

    #[test]
    fn test_first_and_repeat_are_both_reported() {
        let rows = vec![
            vec![text("A"), num(1.0)],
            vec![text("B"), num(2.0)],
            vec![text("A"), num(1.0)],
        ];
        let dupes = detect(&rows);
        assert_eq!(dupes, [0, 2].into_iter().collect());
    }

    #[test]
    fn test_three_copies_all_reported() {
        let row = vec![text("x")];
        let rows = vec![row.clone(), row.clone(), row];
        assert_eq!(detect(&rows), [0, 1, 2].into_iter().collect());
    }

    #[test]
    fn test_type_mismatch_is_not_a_duplicate() {
        let rows = vec![vec![text("1")], vec![num(1.0)]];
        assert!(detect(&rows).is_empty());
    }

    #[test]
    fn test_cell_order_matters() {
        let rows = vec![vec![num(1.0), num(2.0)], vec![num(2.0), num(1.0)]];
        assert!(detect(&rows).is_empty());
    }

    #[test]
    fn test_blank_rows_are_duplicates_of_each_other() {
        let rows = vec![
            vec![CellValue::Null, CellValue::Null],
            vec![CellValue::Null, CellValue::Null],
        ];
        assert_eq!(detect(&rows), [0, 1].into_iter().collect());
    }

    #[test]
    fn test_symmetry_across_many_rows() {
        let rows: Vec<_> = (0..100)
            .map(|i| vec![num((i % 10) as f64)])
            .collect();
        let dupes = detect(&rows);
        // every residue class appears ten times, so every index is in
        assert_eq!(dupes.len(), 100);
    }
}
