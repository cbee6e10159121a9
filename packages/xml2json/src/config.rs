//! Configuration constants and conversion options.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Default maximum element nesting depth below a record.
///
/// Decoding is recursive, so the limit keeps hostile documents from
/// exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Maximum mapping file size in bytes (1 MB).
pub const MAX_MAPPING_SIZE: usize = 1_000_000;

/// Date layout accepted by the `calculate` transformation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date pattern: YYYY-MM-DD with exactly four year digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Parse a `YYYY-MM-DD` date.
///
/// The shape is checked before parsing, so short years such as `85-07-15`
/// are rejected instead of being read as year 85.
///
/// # Examples
/// ```
/// use xml2json::config::parse_date;
///
/// assert!(parse_date("1985-07-15").is_some());
/// assert!(parse_date("85-07-15").is_none());
/// assert!(parse_date("2025-13-01").is_none()); // Invalid month
/// ```
#[must_use]
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    if !DATE_PATTERN.is_match(date_str) {
        return None;
    }
    NaiveDate::parse_from_str(date_str, DATE_FORMAT).ok()
}

/// Options for a single conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum nesting depth of elements inside a record.
    pub max_depth: usize,
}

impl ConvertOptions {
    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
