//! Applies a mapping specification to raw records.

use serde_json::{Map, Value};

use super::rule::{Extraction, FieldRule};
use super::spec::MappingSpec;
use crate::registry::TransformationRegistry;
use crate::types::{RawRecord, Record};

/// Maps raw records to output records.
///
/// A field whose rule cannot resolve is left out of the output record.
/// Omission never fails the record or the document.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper<'a> {
    spec: &'a MappingSpec,
    registry: &'a TransformationRegistry,
}

impl<'a> FieldMapper<'a> {
    /// Create a mapper for one specification and registry.
    #[must_use]
    pub fn new(spec: &'a MappingSpec, registry: &'a TransformationRegistry) -> Self {
        Self { spec, registry }
    }

    /// Map one raw record.
    #[must_use]
    pub fn map(&self, record: &RawRecord) -> Record {
        let mut output = Record::new();
        for (name, rule) in self.spec.fields() {
            match self.resolve(rule, record) {
                Some(value) => {
                    output.insert(name.to_string(), value);
                }
                None => tracing::trace!(field = %name, "Field omitted"),
            }
        }
        output
    }

    /// Resolve one rule against a record.
    fn resolve(&self, rule: &FieldRule, record: &RawRecord) -> Option<Value> {
        match rule {
            FieldRule::Rename(source) => record.get(source).map(|value| value.to_json()),
            FieldRule::Operation {
                candidates,
                fallback,
            } => {
                let registered = candidates.iter().find_map(|call| {
                    self.registry
                        .lookup(&call.name)
                        .map(|transformation| (transformation, &call.params))
                });
                match registered {
                    Some((transformation, params)) => transformation.apply(record, params),
                    None => fallback
                        .as_ref()
                        .and_then(|extraction| extract(extraction, record)),
                }
            }
            FieldRule::Extract(extraction) => extract(extraction, record),
            FieldRule::Unsupported(_) => None,
        }
    }
}

fn extract(extraction: &Extraction, record: &RawRecord) -> Option<Value> {
    let value = record.get(&extraction.field)?;
    let Some(subfields) = &extraction.subfields else {
        return Some(value.to_json());
    };

    let children = value.as_node()?;
    let picked: Map<String, Value> = subfields
        .iter()
        .filter_map(|(out, src)| children.get(src).map(|child| (out.clone(), child.to_json())))
        .collect();

    if picked.is_empty() {
        None
    } else {
        Some(Value::Object(picked))
    }
}
