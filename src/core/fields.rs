//! Tolerant field extraction for loosely-typed store records.
//!
//! Store assets arrive as generic JSON objects. Only identity fields are
//! required; everything else takes a documented default when missing or of
//! the wrong type.

use serde_json::{Map, Value};

use crate::core::error::DaisError;

/// A single raw record from a store asset.
pub type Record = Map<String, Value>;

/// Required identity field. Strings pass through, numbers are stringified,
/// anything else counts as a malformed record.
pub fn required_str(record: &Record, kind: &str, key: &str) -> Result<String, DaisError> {
    match record.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(DaisError::MalformedRecord(format!(
            "{kind} record is missing required field '{key}'"
        ))),
    }
}

pub fn str_or(record: &Record, key: &str, default: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

/// Nullable text field: absent, `null` or non-string all read as `None`.
pub fn nullable_str(record: &Record, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

pub fn int_or(record: &Record, key: &str, default: i64) -> i64 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        _ => default,
    }
}

pub fn bool_or(record: &Record, key: &str, default: bool) -> bool {
    match record.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

/// Ordered list of string identifiers; non-string elements are skipped.
pub fn str_list(record: &Record, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Collection field holding nested records. An absent field reads as empty;
/// a non-object element is a malformed record.
pub fn records_in<'a>(
    record: &'a Record,
    kind: &str,
    key: &str,
) -> Result<Vec<&'a Record>, DaisError> {
    match record.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_object().ok_or_else(|| {
                    DaisError::MalformedRecord(format!("{kind} '{key}' entries must be objects"))
                })
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}
