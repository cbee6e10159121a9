//! Error types for the converter.
//!
//! Document-level failures abort the whole conversion. Per-field omissions
//! are not errors and never show up here.

use thiserror::Error;

/// Main error type for the xml2json library.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The XML token stream is broken or ends before an element is closed.
    #[error("Malformed XML document at byte {position}: {reason}")]
    MalformedDocument { position: u64, reason: String },

    /// Element nesting is deeper than the configured limit.
    #[error("XML nesting exceeds maximum depth of {limit} at byte {position}")]
    DepthExceeded { limit: usize, position: u64 },

    /// The configured top-level element never occurred in the document.
    #[error("No <{element}> records found in the XML document")]
    NoRecordsFound { element: String },

    /// Mapping specification parsed but cannot be used.
    #[error("Invalid mapping specification: {0}")]
    InvalidMapping(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Mapping file is not valid YAML or has the wrong shape.
    #[error("Failed to parse mapping YAML: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl ConvertError {
    /// Build a [`ConvertError::MalformedDocument`] from anything printable.
    pub fn malformed(position: u64, reason: impl std::fmt::Display) -> Self {
        Self::MalformedDocument {
            position,
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
