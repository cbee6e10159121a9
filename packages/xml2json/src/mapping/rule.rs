//! Field rules: how one output field is derived from a raw record.

use std::collections::BTreeMap;

use serde_json::Value;

/// Rule key naming the source field of an extraction.
pub const FIELD_KEY: &str = "field";

/// Rule key holding the subfield selection of an extraction.
pub const SUBFIELDS_KEY: &str = "subfields";

/// One operation-shaped entry of a rule mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationCall {
    /// Operation name, looked up in the transformation registry.
    pub name: String,
    /// Parameters passed to the transformation unchanged.
    pub params: Value,
}

/// Extraction of a record field, optionally narrowed to some subfields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Source field in the raw record.
    pub field: String,
    /// Output subfield name to source subfield name.
    pub subfields: Option<BTreeMap<String, String>>,
}

impl Extraction {
    /// Extract a whole field.
    #[must_use]
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            subfields: None,
        }
    }

    /// Extract selected subfields of a node-valued field.
    #[must_use]
    pub fn with_subfields<I, K, V>(field: impl Into<String>, subfields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            field: field.into(),
            subfields: Some(
                subfields
                    .into_iter()
                    .map(|(out, src)| (out.into(), src.into()))
                    .collect(),
            ),
        }
    }
}

/// How one output field is derived.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Copy a field verbatim under a new name.
    Rename(String),
    /// Invoke the first registered operation among `candidates`.
    ///
    /// Candidates are sorted by name. When none of them is registered the
    /// `fallback` extraction is used, if the rule carries one.
    Operation {
        candidates: Vec<OperationCall>,
        fallback: Option<Extraction>,
    },
    /// Extract a field, optionally narrowed to subfields.
    Extract(Extraction),
    /// A rule in a shape that can never resolve.
    Unsupported(String),
}

impl FieldRule {
    /// Create a rename rule.
    #[must_use]
    pub fn rename(source: impl Into<String>) -> Self {
        Self::Rename(source.into())
    }

    /// Create a rule invoking a single operation.
    #[must_use]
    pub fn operation(name: impl Into<String>, params: Value) -> Self {
        Self::Operation {
            candidates: vec![OperationCall {
                name: name.into(),
                params,
            }],
            fallback: None,
        }
    }

    /// Parse a rule from its configuration value.
    ///
    /// - a string is a rename,
    /// - a mapping is an operation and/or an extraction: every key other
    ///   than `field` and `subfields` is an operation candidate, `field`
    ///   (a non-empty string) with optional `subfields` is the extraction,
    /// - anything else is [`FieldRule::Unsupported`].
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(source) => Self::Rename(source.clone()),
            Value::Object(entries) => {
                let mut candidates: Vec<OperationCall> = entries
                    .iter()
                    .filter(|(key, _)| key.as_str() != FIELD_KEY && key.as_str() != SUBFIELDS_KEY)
                    .map(|(key, params)| OperationCall {
                        name: key.clone(),
                        params: params.clone(),
                    })
                    .collect();
                candidates.sort_by(|a, b| a.name.cmp(&b.name));
                let extraction = parse_extraction(entries);

                match (candidates.is_empty(), extraction) {
                    (false, fallback) => Self::Operation {
                        candidates,
                        fallback,
                    },
                    (true, Some(extraction)) => Self::Extract(extraction),
                    (true, None) => Self::Unsupported(
                        "mapping without operation or non-empty 'field'".to_string(),
                    ),
                }
            }
            Value::Null => Self::Unsupported("null".to_string()),
            Value::Bool(_) => Self::Unsupported("boolean".to_string()),
            Value::Number(_) => Self::Unsupported("number".to_string()),
            Value::Array(_) => Self::Unsupported("list".to_string()),
        }
    }

    /// Names of the operation candidates, in resolution order.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        let candidates: &[OperationCall] = match self {
            Self::Operation { candidates, .. } => candidates,
            _ => &[],
        };
        candidates.iter().map(|call| call.name.as_str())
    }
}

fn parse_extraction(entries: &serde_json::Map<String, Value>) -> Option<Extraction> {
    let field = match entries.get(FIELD_KEY)? {
        Value::String(field) if !field.is_empty() => field.clone(),
        other => {
            tracing::warn!(value = %other, "Ignoring 'field' that is not a non-empty string");
            return None;
        }
    };

    let subfields = match entries.get(SUBFIELDS_KEY) {
        None => None,
        Some(Value::Object(map)) => Some(
            map.iter()
                .filter_map(|(out, src)| match src {
                    Value::String(src) => Some((out.clone(), src.clone())),
                    _ => {
                        tracing::warn!(subfield = %out, "Ignoring subfield whose source is not a string");
                        None
                    }
                })
                .collect(),
        ),
        Some(other) => {
            tracing::warn!(
                field = %field,
                value = %other,
                "Ignoring 'subfields' that is not a mapping, copying the whole field"
            );
            None
        }
    };

    Some(Extraction { field, subfields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_string_is_rename() {
        assert_eq!(FieldRule::from_value(&json!("ID")), FieldRule::rename("ID"));
    }

    #[test]
    fn test_single_operation() {
        assert_eq!(
            FieldRule::from_value(&json!({"combine": ["FirstName", "LastName"]})),
            FieldRule::operation("combine", json!(["FirstName", "LastName"]))
        );
    }

    #[test]
    fn test_operation_candidates_sorted() {
        let rule = FieldRule::from_value(&json!({"zeta": 1, "calculate": "DOB", "alpha": 2}));
        let names: Vec<&str> = rule.operation_names().collect();
        assert_eq!(names, vec!["alpha", "calculate", "zeta"]);
    }

    #[test]
    fn test_operation_with_fallback_extraction() {
        let rule = FieldRule::from_value(&json!({"custom": "x", "field": "Name"}));
        assert_eq!(
            rule,
            FieldRule::Operation {
                candidates: vec![OperationCall {
                    name: "custom".to_string(),
                    params: json!("x"),
                }],
                fallback: Some(Extraction::field("Name")),
            }
        );
    }

    #[test]
    fn test_extract_with_subfields() {
        let rule = FieldRule::from_value(&json!({
            "field": "Address",
            "subfields": {"city": "City", "zip": "PostalCode", "bad": 3}
        }));
        assert_eq!(
            rule,
            FieldRule::Extract(Extraction::with_subfields(
                "Address",
                [("city", "City"), ("zip", "PostalCode")]
            ))
        );
    }

    #[test]
    fn test_extract_non_mapping_subfields_copies_field() {
        let rule = FieldRule::from_value(&json!({"field": "Address", "subfields": "City"}));
        assert_eq!(rule, FieldRule::Extract(Extraction::field("Address")));
    }

    #[test]
    fn test_empty_field_is_unsupported() {
        assert!(matches!(
            FieldRule::from_value(&json!({"field": ""})),
            FieldRule::Unsupported(_)
        ));
        assert!(matches!(
            FieldRule::from_value(&json!({"field": 7})),
            FieldRule::Unsupported(_)
        ));
        assert!(matches!(FieldRule::from_value(&json!({})), FieldRule::Unsupported(_)));
    }

    #[test]
    fn test_scalar_shapes_unsupported() {
        for value in [json!(null), json!(true), json!(1), json!(["a"])] {
            assert!(matches!(FieldRule::from_value(&value), FieldRule::Unsupported(_)));
        }
    }
}
