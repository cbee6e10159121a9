//! Conversion service that ties scanning, mapping and the registry together.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::Result;
use crate::mapping::{FieldMapper, FieldRule, MappingSpec};
use crate::registry::TransformationRegistry;
use crate::types::Record;
use crate::xml::{DocumentScanner, TreeDecoder};

/// Converts XML documents into output records for one mapping.
#[derive(Debug)]
pub struct Converter<'a> {
    spec: &'a MappingSpec,
    registry: &'a TransformationRegistry,
    options: ConvertOptions,
}

impl<'a> Converter<'a> {
    /// Create a converter and check the mapping against the registry.
    ///
    /// Operation rules none of whose candidates are registered are logged
    /// as warnings; they still resolve through their `field` fallback if
    /// they carry one.
    #[must_use]
    pub fn new(
        spec: &'a MappingSpec,
        registry: &'a TransformationRegistry,
        options: ConvertOptions,
    ) -> Self {
        tracing::debug!(operations = ?registry.names(), "Available transformations");

        for (name, rule) in spec.fields() {
            if let FieldRule::Operation { fallback, .. } = rule {
                let mut candidates = rule.operation_names();
                if !candidates.any(|op| registry.contains(op)) {
                    let operations: Vec<&str> = rule.operation_names().collect();
                    tracing::warn!(
                        field = %name,
                        operations = ?operations,
                        has_fallback = fallback.is_some(),
                        "No registered transformation for field rule"
                    );
                }
            }
        }

        Self {
            spec,
            registry,
            options,
        }
    }

    /// Convert one in-memory document into output records in document order.
    ///
    /// # Errors
    /// Returns the scanner's document-level error; no partial output is
    /// produced.
    pub fn convert(&self, xml: &[u8]) -> Result<Vec<Record>> {
        let scanner = DocumentScanner::new(
            self.spec.top_level_field(),
            TreeDecoder::new(self.options.max_depth),
        );
        let mapper = FieldMapper::new(self.spec, self.registry);

        let mut records = Vec::new();
        scanner.scan(xml, |raw| {
            let record = mapper.map(&raw);
            tracing::debug!(
                record = records.len() + 1,
                fields = record.len(),
                "Mapped record"
            );
            records.push(record);
        })?;

        tracing::info!(
            element = %self.spec.top_level_field(),
            records = records.len(),
            "Conversion finished"
        );
        Ok(records)
    }

    /// Convert a document and wrap the records under the top-level name.
    ///
    /// # Errors
    /// Same as [`Converter::convert`].
    pub fn convert_wrapped(&self, xml: &[u8]) -> Result<Value> {
        let records = self.convert(xml)?;
        Ok(wrap_output(self.spec, records))
    }
}

/// Wrap records as `{ "<topLevelField>": [ ... ] }`.
#[must_use]
pub fn wrap_output(spec: &MappingSpec, records: Vec<Record>) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(
        spec.top_level_field().to_string(),
        Value::Array(records.into_iter().map(Value::Object).collect()),
    );
    Value::Object(wrapper)
}

/// Load a mapping file and an XML file and convert them with the built-in
/// transformations.
///
/// # Errors
/// Returns an error if either file cannot be read, the mapping is invalid,
/// or the document fails to convert.
pub fn convert_file(
    mapping_path: &Path,
    input_path: &Path,
    options: ConvertOptions,
) -> Result<Value> {
    let spec = MappingSpec::from_yaml_file(mapping_path)?;
    let registry = TransformationRegistry::with_builtins();

    tracing::debug!(path = %input_path.display(), "Reading XML document");
    let xml = fs::read(input_path)?;

    Converter::new(&spec, &registry, options).convert_wrapped(&xml)
}
