//! Document scanner that cuts the token stream into raw records.

use std::io::BufRead;

use super::decoder::TreeDecoder;
use super::reader::{Token, TokenReader};
use crate::error::{ConvertError, Result};
use crate::types::{GenericValue, RawRecord};

/// Scans a document for occurrences of the top-level record element.
///
/// Every occurrence becomes one [`RawRecord`], seeded with the element's
/// attributes and filled with its decoded children. Elements outside a
/// record are walked through without being stored.
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    top_level: String,
    decoder: TreeDecoder,
}

impl DocumentScanner {
    /// Create a scanner for records named `top_level`.
    #[must_use]
    pub fn new(top_level: impl Into<String>, decoder: TreeDecoder) -> Self {
        Self {
            top_level: top_level.into(),
            decoder,
        }
    }

    /// Scan the whole document, calling `on_record` once per record in
    /// document order. Returns the number of records found.
    ///
    /// # Errors
    /// - `MalformedDocument` on tokenizer failures or when the input ends
    ///   before every open element is closed
    /// - `DepthExceeded` when a record is nested too deeply
    /// - `NoRecordsFound` when the record element never occurs
    pub fn scan<R, F>(&self, source: R, mut on_record: F) -> Result<usize>
    where
        R: BufRead,
        F: FnMut(RawRecord),
    {
        let mut reader = TokenReader::new(source);
        // Elements opened by the scanner itself; record children are
        // consumed whole by the decoder and never appear here.
        let mut open: Vec<String> = Vec::new();
        let mut current: Option<RawRecord> = None;
        let mut count = 0;

        loop {
            match reader.next_token()? {
                Token::Start { name, attributes } if name == self.top_level => {
                    self.warn_if_replacing(current.as_ref(), reader.position());
                    current = Some(RawRecord::with_attributes(attributes));
                    open.push(name);
                }
                Token::Empty { name, attributes } if name == self.top_level => {
                    self.warn_if_replacing(current.as_ref(), reader.position());
                    count += 1;
                    on_record(RawRecord::with_attributes(attributes));
                    current = None;
                }
                Token::Start { name, .. } => match current.as_mut() {
                    Some(record) => {
                        let value = self.decoder.decode(&mut reader, &name)?;
                        record.insert(name, value);
                    }
                    None => open.push(name),
                },
                Token::Empty { name, .. } => {
                    if let Some(record) = current.as_mut() {
                        let value = self.decoder.decode_empty(&reader)?;
                        record.insert(name, value);
                    }
                }
                Token::End { name } => {
                    open.pop();
                    if name == self.top_level {
                        if let Some(record) = current.take() {
                            count += 1;
                            tracing::trace!(record = count, fields = record.len(), "Record decoded");
                            on_record(record);
                        }
                    }
                }
                Token::Text(_) | Token::CData(_) | Token::Markup => {}
                Token::Eof => break,
            }
        }

        if let Some(name) = open.last() {
            return Err(ConvertError::malformed(
                reader.position(),
                format!("unexpected end of document inside <{name}>"),
            ));
        }

        if count == 0 {
            return Err(ConvertError::NoRecordsFound {
                element: self.top_level.clone(),
            });
        }

        Ok(count)
    }

    fn warn_if_replacing(&self, current: Option<&RawRecord>, position: u64) {
        if current.is_some() {
            tracing::warn!(
                element = %self.top_level,
                position,
                "Nested record element replaces the open record"
            );
        }
    }

    /// Scan the whole document and collect the raw records.
    ///
    /// # Errors
    /// Same as [`DocumentScanner::scan`].
    pub fn collect<R: BufRead>(&self, source: R) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        self.scan(source, |record| records.push(record))?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PATIENTS: &str = r#"<?xml version="1.0"?>
<Patients>
  <Meta><Source>test</Source></Meta>
  <Patient ID="123">
    <FirstName>John</FirstName>
    <LastName>Doe</LastName>
  </Patient>
  <Patient ID="456">
    <FirstName>Jane</FirstName>
    <LastName>Smith</LastName>
  </Patient>
</Patients>"#;

    fn scanner(top_level: &str) -> DocumentScanner {
        DocumentScanner::new(top_level, TreeDecoder::new(16))
    }

    #[test]
    fn test_records_in_document_order() {
        let records = scanner("Patient").collect(PATIENTS.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ID"), Some(&GenericValue::leaf("123")));
        assert_eq!(records[0].get("FirstName"), Some(&GenericValue::leaf("John")));
        assert_eq!(records[1].get("ID"), Some(&GenericValue::leaf("456")));
        assert_eq!(records[1].get("LastName"), Some(&GenericValue::leaf("Smith")));
    }

    #[test]
    fn test_elements_outside_records_ignored() {
        let records = scanner("Patient").collect(PATIENTS.as_bytes()).unwrap();
        assert!(records.iter().all(|r| !r.contains("Meta") && !r.contains("Source")));
    }

    #[test]
    fn test_scan_counts_and_calls_back() {
        let mut seen = Vec::new();
        let count = scanner("Patient")
            .scan(PATIENTS.as_bytes(), |record| {
                seen.push(record.get("ID").and_then(GenericValue::as_leaf).map(String::from));
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen, vec![Some("123".to_string()), Some("456".to_string())]);
    }

    #[test]
    fn test_child_overwrites_attribute() {
        let xml = r#"<Patient ID="attr"><ID>child</ID></Patient>"#;
        let records = scanner("Patient").collect(xml.as_bytes()).unwrap();
        assert_eq!(records[0].get("ID"), Some(&GenericValue::leaf("child")));
    }

    #[test]
    fn test_self_closing_record() {
        let xml = r#"<List><Item code="a"/><Item code="b"><Empty/></Item></List>"#;
        let records = scanner("Item").collect(xml.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RawRecord::with_attributes([("code", "a")]));
        assert_eq!(records[1].get("Empty"), Some(&GenericValue::leaf("")));
    }

    #[test]
    fn test_deeply_nested_records_found() {
        let xml = "<a><b><c><Item><v>1</v></Item></c></b></a>";
        let records = scanner("Item").collect(xml.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_no_records_found() {
        let err = scanner("Doctor").collect(PATIENTS.as_bytes()).unwrap_err();
        assert!(matches!(err, ConvertError::NoRecordsFound { ref element } if element == "Doctor"));
    }

    #[test]
    fn test_empty_input_has_no_records() {
        let err = scanner("Patient").collect(&b""[..]).unwrap_err();
        assert!(matches!(err, ConvertError::NoRecordsFound { .. }));
    }

    #[test]
    fn test_unterminated_record_is_malformed() {
        let xml = r#"<Patients><Patient ID="1"><FirstName>John</FirstName>"#;
        let err = scanner("Patient").collect(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedDocument { .. }), "got {err:?}");
    }

    #[test]
    fn test_unterminated_child_is_malformed() {
        let xml = r#"<Patients><Patient><FirstName>John"#;
        let err = scanner("Patient").collect(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedDocument { .. }));
    }

    #[test]
    fn test_malformed_after_records_fails_whole_document() {
        let xml = r#"<Patients><Patient ID="1"/><Patient ID="2"></Oops></Patients>"#;
        let err = scanner("Patient").collect(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedDocument { .. }));
    }

    #[test]
    fn test_unclosed_ancestor_after_records_is_malformed() {
        let xml = r#"<Patients><Patient ID="1"></Patient><Patient ID="2"></Patient>"#;
        let err = scanner("Patient").collect(xml.as_bytes()).unwrap_err();
        assert!(
            matches!(err, ConvertError::MalformedDocument { ref reason, .. } if reason.contains("<Patients>")),
            "got {err:?}"
        );
    }

    #[test]
    fn test_unclosed_sibling_after_record_is_malformed() {
        let xml = r#"<Patients><Patient ID="1"></Patient><Other><x>"#;
        let err = scanner("Patient").collect(xml.as_bytes()).unwrap_err();
        assert!(
            matches!(err, ConvertError::MalformedDocument { ref reason, .. } if reason.contains("<Other>")),
            "got {err:?}"
        );
    }

    #[test]
    fn test_nested_record_replaces_open_record() {
        let xml = r#"<Patient ID="1"><Name>x</Name><Patient ID="2"><Name>y</Name></Patient></Patient>"#;
        let records = scanner("Patient").collect(xml.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("ID"), Some(&GenericValue::leaf("2")));
        assert_eq!(records[0].get("Name"), Some(&GenericValue::leaf("y")));
    }

    #[test]
    fn test_nested_self_closing_record_replaces_open_record() {
        let xml = r#"<Patient ID="1"><Name>x</Name><Patient ID="2"/></Patient>"#;
        let records = scanner("Patient").collect(xml.as_bytes()).unwrap();
        assert_eq!(records, vec![RawRecord::with_attributes([("ID", "2")])]);
    }

    #[test]
    fn test_self_closing_child_counts_toward_depth() {
        let scanner = DocumentScanner::new("Patient", TreeDecoder::new(0));

        let err = scanner.collect(&b"<Patient><a/></Patient>"[..]).unwrap_err();
        assert!(matches!(err, ConvertError::DepthExceeded { limit: 0, .. }));

        let err = scanner.collect(&b"<Patient><a></a></Patient>"[..]).unwrap_err();
        assert!(matches!(err, ConvertError::DepthExceeded { limit: 0, .. }));

        assert_eq!(scanner.collect(&b"<Patient ID=\"1\"/>"[..]).unwrap().len(), 1);
    }

    #[test]
    fn test_depth_exceeded_inside_record() {
        let xml = "<Patient><a><b><c>x</c></b></a></Patient>";
        let scanner = DocumentScanner::new("Patient", TreeDecoder::new(2));
        let err = scanner.collect(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, ConvertError::DepthExceeded { limit: 2, .. }));
    }
}
