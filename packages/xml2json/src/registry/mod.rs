//! Transformation registry for computed output fields.
//!
//! Mapping rules refer to transformations by operation name. The registry
//! resolves those names to functions and can be extended at start-up with
//! caller-provided transformations next to the built-ins.

pub mod builtins;
mod config;
mod core;
mod transformation;

pub use config::register_builtins;
pub use core::TransformationRegistry;
pub use transformation::Transformation;
