//! Recursive decoding of one XML subtree into a [`GenericValue`].

use std::collections::BTreeMap;
use std::io::BufRead;

use super::reader::{Token, TokenReader};
use super::utils::TextRuns;
use crate::error::{ConvertError, Result};
use crate::types::GenericValue;

/// Decodes an element's content into a leaf or node value.
///
/// Nesting is limited to `max_depth` levels, counting the element handed to
/// [`TreeDecoder::decode`] as level one.
#[derive(Debug, Clone, Copy)]
pub struct TreeDecoder {
    max_depth: usize,
}

impl TreeDecoder {
    /// Create a decoder with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Decode the element whose start tag `name` was just read.
    ///
    /// Consumes tokens up to and including the matching end tag.
    ///
    /// # Errors
    /// Returns `MalformedDocument` if the input ends first and
    /// `DepthExceeded` if nesting goes past the limit.
    pub fn decode<R: BufRead>(
        &self,
        reader: &mut TokenReader<R>,
        name: &str,
    ) -> Result<GenericValue> {
        self.decode_element(reader, name, 1)
    }

    /// Decode a self-closing element at level one.
    ///
    /// # Errors
    /// Returns `DepthExceeded` if the limit is zero.
    pub fn decode_empty<R: BufRead>(&self, reader: &TokenReader<R>) -> Result<GenericValue> {
        self.check_depth(reader, 1)?;
        Ok(GenericValue::leaf(""))
    }

    fn decode_element<R: BufRead>(
        &self,
        reader: &mut TokenReader<R>,
        name: &str,
        depth: usize,
    ) -> Result<GenericValue> {
        self.check_depth(reader, depth)?;

        let mut children: BTreeMap<String, GenericValue> = BTreeMap::new();
        let mut text = TextRuns::new();

        loop {
            match reader.next_token()? {
                Token::Start { name: child, .. } => {
                    text.flush();
                    let value = self.decode_element(reader, &child, depth + 1)?;
                    children.insert(child, value);
                }
                Token::Empty { name: child, .. } => {
                    text.flush();
                    self.check_depth(reader, depth + 1)?;
                    children.insert(child, GenericValue::leaf(""));
                }
                Token::Text(content) => text.push(&content),
                Token::CData(content) => {
                    text.flush();
                    text.push(&content);
                    text.flush();
                }
                Token::Markup => text.flush(),
                Token::End { .. } => break,
                Token::Eof => {
                    return Err(ConvertError::malformed(
                        reader.position(),
                        format!("unexpected end of document inside <{name}>"),
                    ));
                }
            }
        }

        if children.is_empty() {
            Ok(GenericValue::Leaf(text.finish()))
        } else {
            Ok(GenericValue::Node(children))
        }
    }

    fn check_depth<R: BufRead>(&self, reader: &TokenReader<R>, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ConvertError::DepthExceeded {
                limit: self.max_depth,
                position: reader.position(),
            });
        }
        Ok(())
    }
}

impl Default for TreeDecoder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_DEPTH)
    }
}
