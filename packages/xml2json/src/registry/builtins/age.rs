//! Age calculation from a `YYYY-MM-DD` birth date.

use chrono::{Datelike, Local, NaiveDate};
use serde_json::Value;

use crate::config::parse_date;
use crate::types::RawRecord;

/// Operation name used in mapping files.
pub const CALCULATE: &str = "calculate";

/// Compute the age in whole years from the date held in the field named by
/// `params`, relative to today.
pub fn calculate_age(record: &RawRecord, params: &Value) -> Option<Value> {
    calculate_age_at(record, params, Local::now().date_naive())
}

/// Compute the age in whole years relative to `today`.
///
/// The birthday check compares day-of-year numbers, so around 29 February
/// of a leap year the result can be one year off for a single day.
pub fn calculate_age_at(record: &RawRecord, params: &Value, today: NaiveDate) -> Option<Value> {
    let field = params.as_str().filter(|name| !name.is_empty())?;
    let text = record.get(field)?.as_leaf()?;
    let birth = parse_date(text)?;

    let mut age = today.year() - birth.year();
    if today.ordinal() < birth.ordinal() {
        age -= 1;
    }
    Some(Value::from(age))
}
