//! Mapping specification: record element name plus field rules.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::rule::FieldRule;
use crate::config::MAX_MAPPING_SIZE;
use crate::error::{ConvertError, Result};

/// On-disk shape of a mapping file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MappingFile {
    top_level_field: String,
    #[serde(default)]
    fields: BTreeMap<String, Value>,
}

/// Declarative mapping from XML records to output records.
///
/// Immutable once built; the same spec is used for every record.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingSpec {
    top_level_field: String,
    fields: BTreeMap<String, FieldRule>,
}

impl MappingSpec {
    /// Build a spec from a record element name and output field rules.
    ///
    /// # Errors
    /// Returns `InvalidMapping` if `top_level_field` is blank.
    pub fn new<I, K>(top_level_field: impl Into<String>, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, FieldRule)>,
        K: Into<String>,
    {
        let top_level_field = top_level_field.into();
        if top_level_field.trim().is_empty() {
            return Err(ConvertError::InvalidMapping(
                "topLevelField must not be empty".to_string(),
            ));
        }

        let fields: BTreeMap<String, FieldRule> = fields
            .into_iter()
            .map(|(name, rule)| (name.into(), rule))
            .collect();

        for (name, rule) in &fields {
            if let FieldRule::Unsupported(kind) = rule {
                tracing::warn!(field = %name, kind = %kind, "Field rule can never resolve");
            }
        }
        if fields.is_empty() {
            tracing::warn!(element = %top_level_field, "Mapping has no fields, records will be empty");
        }

        Ok(Self {
            top_level_field,
            fields,
        })
    }

    /// Load a mapping specification from a YAML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is larger than
    /// [`MAX_MAPPING_SIZE`], or does not contain a valid mapping.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading mapping specification");

        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_MAPPING_SIZE as u64 {
            return Err(ConvertError::InvalidMapping(format!(
                "mapping file exceeds maximum size limit ({MAX_MAPPING_SIZE} bytes)"
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a mapping specification from YAML text.
    ///
    /// # Examples
    /// ```
    /// use xml2json::MappingSpec;
    ///
    /// let spec = MappingSpec::from_yaml_str(
    ///     "topLevelField: Patient\nfields:\n  id: ID\n",
    /// ).unwrap();
    /// assert_eq!(spec.top_level_field(), "Patient");
    /// assert_eq!(spec.fields().count(), 1);
    /// ```
    ///
    /// # Errors
    /// Returns `YamlParse` for invalid YAML and `InvalidMapping` for a
    /// blank record element name or oversized content.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.len() > MAX_MAPPING_SIZE {
            return Err(ConvertError::InvalidMapping(format!(
                "mapping content exceeds maximum size limit ({MAX_MAPPING_SIZE} bytes)"
            )));
        }

        let file: MappingFile = serde_yaml_ng::from_str(content)?;
        let fields = file
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), FieldRule::from_value(value)));
        let spec = Self::new(file.top_level_field, fields)?;

        tracing::debug!(
            element = %spec.top_level_field,
            fields = spec.fields.len(),
            "Parsed mapping specification"
        );
        Ok(spec)
    }

    /// Name of the repeating record element, also the output wrapper key.
    #[must_use]
    pub fn top_level_field(&self) -> &str {
        &self.top_level_field
    }

    /// Output field names with their rules, in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Rule for one output field.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }
}
