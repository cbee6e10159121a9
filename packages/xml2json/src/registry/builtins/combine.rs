//! Concatenation of several fields into one string.

use serde_json::Value;

use crate::types::RawRecord;

/// Operation name used in mapping files.
pub const COMBINE: &str = "combine";

/// Join the values of the listed fields with single spaces.
///
/// `params` must be a list. Entries that are not strings, are empty, or name
/// a missing field are skipped. An empty list yields an empty string.
pub fn combine_fields(record: &RawRecord, params: &Value) -> Option<Value> {
    let names = params.as_array()?;

    let mut combined = String::new();
    for name in names
        .iter()
        .filter_map(Value::as_str)
        .filter(|name| !name.is_empty())
    {
        if let Some(value) = record.get(name) {
            combined.push(' ');
            combined.push_str(&value.to_text());
        }
    }

    Some(Value::String(combined.trim().to_string()))
}
