//! Mapping specifications and their application to raw records.

mod mapper;
mod rule;
mod spec;

pub use mapper::FieldMapper;
pub use rule::{Extraction, FieldRule, OperationCall, FIELD_KEY, SUBFIELDS_KEY};
pub use spec::MappingSpec;
