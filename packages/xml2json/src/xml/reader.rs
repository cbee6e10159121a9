//! Token reader on top of the quick-xml event stream.
//!
//! Events are converted into owned [`Token`]s so the decoder can recurse
//! without holding a borrow of the read buffer.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::utils::{is_namespace_declaration, resolve_entity};
use crate::error::{ConvertError, Result};

/// One token of the XML stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Opening tag with local name and attributes.
    Start {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// Self-closing tag.
    Empty {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// Closing tag. The tokenizer guarantees it matches the open tag.
    End { name: String },
    /// Character data or a resolved entity reference.
    Text(String),
    /// Content of a CDATA section.
    CData(String),
    /// Comment, processing instruction, declaration or doctype.
    Markup,
    /// End of input.
    Eof,
}

/// Pull reader producing [`Token`]s.
pub struct TokenReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<'a> TokenReader<&'a [u8]> {
    /// Create a reader over an in-memory document.
    #[must_use]
    pub fn from_bytes(xml: &'a [u8]) -> Self {
        Self::new(xml)
    }
}

impl<R: BufRead> TokenReader<R> {
    /// Create a reader over any buffered source.
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = true;
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Current byte offset in the input.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.reader.buffer_position()
    }

    /// Read the next token.
    ///
    /// # Errors
    /// Returns `MalformedDocument` for any tokenizer failure, invalid
    /// encoding, malformed attribute or unknown entity.
    pub fn next_token(&mut self) -> Result<Token> {
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => event,
            Err(err) => return Err(ConvertError::malformed(self.reader.error_position(), err)),
        };
        let position = self.reader.buffer_position();

        let token = match event {
            Event::Start(ref start) => Token::Start {
                name: local_name(start, position)?,
                attributes: attributes(start, position)?,
            },
            Event::Empty(ref start) => Token::Empty {
                name: local_name(start, position)?,
                attributes: attributes(start, position)?,
            },
            Event::End(ref end) => Token::End {
                name: decode_utf8(end.local_name().as_ref(), position)?,
            },
            Event::Text(ref text) => Token::Text(
                text.decode()
                    .map_err(|e| ConvertError::malformed(position, e))?
                    .into_owned(),
            ),
            Event::GeneralRef(ref reference) => {
                let raw = reference
                    .decode()
                    .map_err(|e| ConvertError::malformed(position, e))?;
                let resolved = resolve_entity(&raw).ok_or_else(|| {
                    ConvertError::malformed(position, format!("unknown entity reference &{raw};"))
                })?;
                Token::Text(resolved)
            }
            Event::CData(ref cdata) => Token::CData(decode_utf8(cdata, position)?),
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => Token::Markup,
            Event::Eof => Token::Eof,
        };
        Ok(token)
    }
}

fn decode_utf8(bytes: &[u8], position: u64) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ConvertError::malformed(position, e))
}

fn local_name(start: &BytesStart<'_>, position: u64) -> Result<String> {
    decode_utf8(start.local_name().as_ref(), position)
}

/// Collect attributes as local name / unescaped value pairs, skipping
/// namespace declarations.
fn attributes(start: &BytesStart<'_>, position: u64) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ConvertError::malformed(position, e))?;
        if is_namespace_declaration(attr.key.as_ref()) {
            continue;
        }
        let name = decode_utf8(attr.key.local_name().as_ref(), position)?;
        let value = attr
            .unescape_value()
            .map_err(|e| ConvertError::malformed(position, e))?
            .into_owned();
        attrs.push((name, value));
    }
    Ok(attrs)
}
