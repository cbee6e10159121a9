//! Built-in transformation set.

use super::builtins::{calculate_age, combine_fields, CALCULATE, COMBINE};
use super::core::TransformationRegistry;

/// Register the built-in transformations on `registry`.
///
/// Callers may register their own entries afterwards; a later registration
/// under a built-in name overrides it.
pub fn register_builtins(registry: &TransformationRegistry) {
    registry.register(CALCULATE, calculate_age);
    registry.register(COMBINE, combine_fields);
}
