//! xml2json - Convert repeating XML records into JSON.
//!
//! A document is scanned for every occurrence of a configured top-level
//! element. Each occurrence is decoded into a generic tree and mapped to an
//! output record through a declarative YAML mapping. Output fields are
//! renamed copies, computed by named transformations, or extracted subfields.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use xml2json::{ConvertOptions, Converter, MappingSpec, TransformationRegistry};
//!
//! let spec = MappingSpec::from_yaml_str(
//!     "topLevelField: Patient\nfields:\n  id: ID\n  name:\n    combine: [First, Last]\n",
//! ).unwrap();
//! let registry = TransformationRegistry::with_builtins();
//! let converter = Converter::new(&spec, &registry, ConvertOptions::default());
//!
//! let xml = br#"<Patients><Patient ID="7"><First>Ada</First><Last>Lovelace</Last></Patient></Patients>"#;
//! let output = converter.convert_wrapped(xml).unwrap();
//! assert_eq!(output, json!({"Patient": [{"id": "7", "name": "Ada Lovelace"}]}));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and conversion options
//! - [`types`]: Decoded values, raw records and output records
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Token reader, subtree decoder and record scanner
//! - [`registry`]: Named transformations and the built-ins
//! - [`mapping`]: Mapping specification and field mapper
//! - [`converter`]: Conversion service
//! - [`output`]: JSON output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod mapping;
pub mod output;
pub mod registry;
pub mod types;
pub mod xml;

// Re-export main entry points
pub use converter::{convert_file, wrap_output, Converter};

// Re-export commonly used items
pub use config::ConvertOptions;
pub use error::{ConvertError, Result};
pub use mapping::{FieldMapper, FieldRule, MappingSpec};
pub use registry::{Transformation, TransformationRegistry};
pub use types::{GenericValue, RawRecord, Record};
