//! Core data types for decoded XML and mapped output.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// One output record: output field name to JSON value.
pub type Record = Map<String, Value>;

/// Generic in-memory form of one decoded XML element.
///
/// An element with child elements becomes a [`GenericValue::Node`]; an element
/// without children becomes a [`GenericValue::Leaf`] holding its trimmed text.
/// Repeated child names overwrite the earlier value, there is no list form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericValue {
    /// Trimmed text content of a childless element.
    Leaf(String),
    /// Child tag name to decoded child.
    Node(BTreeMap<String, GenericValue>),
}

impl GenericValue {
    /// Create a leaf value.
    #[must_use]
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Return the text if this is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Node(_) => None,
        }
    }

    /// Return the children if this is a node.
    #[must_use]
    pub fn as_node(&self) -> Option<&BTreeMap<String, GenericValue>> {
        match self {
            Self::Leaf(_) => None,
            Self::Node(children) => Some(children),
        }
    }

    /// Textual representation used when a value is embedded in a string.
    ///
    /// Leaves render as their text, nodes as compact JSON.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Leaf(text) => text.clone(),
            Self::Node(_) => self.to_json().to_string(),
        }
    }

    /// Convert to a JSON value (leaf to string, node to object).
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(text) => Value::String(text.clone()),
            Self::Node(children) => Value::Object(
                children
                    .iter()
                    .map(|(name, child)| (name.clone(), child.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Decoded tree for one occurrence of the top-level element.
///
/// Attributes of the element are inserted first; children decoded later
/// replace an attribute with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, GenericValue>,
}

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record seeded with attribute name/value pairs.
    #[must_use]
    pub fn with_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = attributes
            .into_iter()
            .map(|(name, value)| (name.into(), GenericValue::Leaf(value.into())))
            .collect();
        Self { fields }
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: GenericValue) {
        self.fields.insert(name.into(), value);
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GenericValue> {
        self.fields.get(name)
    }

    /// Check whether a field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }
}
