//! Built-in transformation functions.

mod age;
mod combine;

pub use age::{calculate_age, calculate_age_at, CALCULATE};
pub use combine::{combine_fields, COMBINE};
