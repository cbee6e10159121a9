//! XML utility functions shared by the reader and decoder.

use quick_xml::escape::resolve_xml_entity;

/// Check whether an attribute key is a namespace declaration.
///
/// # Examples
/// ```
/// use xml2json::xml::is_namespace_declaration;
///
/// assert!(is_namespace_declaration(b"xmlns"));
/// assert!(is_namespace_declaration(b"xmlns:fhir"));
/// assert!(!is_namespace_declaration(b"ID"));
/// assert!(!is_namespace_declaration(b"xmlnsfoo"));
/// ```
#[must_use]
pub fn is_namespace_declaration(key: &[u8]) -> bool {
    key == b"xmlns" || key.starts_with(b"xmlns:")
}

/// Resolve the body of a general entity reference (the part between `&`
/// and `;`).
///
/// Handles the predefined XML entities and decimal or hexadecimal character
/// references. Returns `None` for anything else.
///
/// # Examples
/// ```
/// use xml2json::xml::resolve_entity;
///
/// assert_eq!(resolve_entity("amp").as_deref(), Some("&"));
/// assert_eq!(resolve_entity("#65").as_deref(), Some("A"));
/// assert_eq!(resolve_entity("#x263A").as_deref(), Some("\u{263A}"));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
#[must_use]
pub fn resolve_entity(raw: &str) -> Option<String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Some(resolved.to_string());
    }

    let rest = raw.strip_prefix('#')?;
    let code = match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => rest.parse::<u32>().ok()?,
    };
    char::from_u32(code).map(String::from)
}

/// Accumulates element text as a sequence of trimmed runs.
///
/// A run is the text between two markup tokens. Each run is trimmed on its
/// own and runs are joined without adding whitespace, so
/// `<a> x <!-- c --> y </a>` yields `xy`.
#[derive(Debug, Default)]
pub struct TextRuns {
    current: String,
    collected: String,
}

impl TextRuns {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text to the current run.
    pub fn push(&mut self, text: &str) {
        self.current.push_str(text);
    }

    /// End the current run.
    pub fn flush(&mut self) {
        self.collected.push_str(self.current.trim());
        self.current.clear();
    }

    /// End the current run and return everything collected.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.flush();
        self.collected
    }
}
