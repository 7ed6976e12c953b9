// ============================================================
// REMOTE RECORD TYPES
// ============================================================
// Shapes for the remotely-fetched dataset the browser operates on

use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of a fetched dataset: a key -> value object. Key order is
/// preserved as received (serde_json `preserve_order`).
pub type Record = serde_json::Map<String, Value>;

/// A fetched dataset plus its column schema. The schema is captured once
/// from the first record and never re-derived per row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Build a record set from a decoded JSON array. Every element must be
    /// an object; the first element fixes the column order.
    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        let mut records = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Value::Object(map) => records.push(map),
                other => {
                    return Err(AppError::Data(format!(
                        "expected record object, got {}",
                        type_name(&other)
                    )))
                }
            }
        }

        let columns = records
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();

        Ok(RecordSet { columns, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The searchable string form of a record field. `Null` has none, so a
/// search term never matches a null cell.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_come_from_first_record() {
        let set = RecordSet::from_values(vec![
            json!({"name": "A", "age": 1}),
            json!({"age": 2, "name": "B"}),
        ])
        .unwrap();
        assert_eq!(set.columns, vec!["name", "age"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_array_yields_empty_set() {
        let set = RecordSet::from_values(vec![]).unwrap();
        assert!(set.is_empty());
        assert!(set.columns.is_empty());
    }

    #[test]
    fn test_non_object_element_is_rejected() {
        let err = RecordSet::from_values(vec![json!([1, 2])]).unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
    }

    #[test]
    fn test_value_text_skips_null() {
        assert_eq!(value_text(&Value::Null), None);
        assert_eq!(value_text(&json!("x")), Some("x".to_string()));
        assert_eq!(value_text(&json!(42)), Some("42".to_string()));
        assert_eq!(value_text(&json!(true)), Some("true".to_string()));
    }
}
