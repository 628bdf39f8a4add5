use std::io::Read;

use tracing::{debug, trace};
use wbxml_wire::code_page::unknown_name;
use wbxml_wire::token::{self, TagToken};
use wbxml_wire::{ByteReader, Charset, StringTable, WbxmlHeader};

use crate::config::DecoderConfig;
use crate::error::TokenError;
use crate::event::ContentSink;
use crate::token_source::TokenSource;

/// Token source for WBXML documents.
///
/// Reads the header, then walks the body token by token, tracking the
/// open elements. An element's kind is only known once its content starts,
/// so each element is held open until the first child tag, the first
/// non-whitespace text, or its END decides it:
///
/// ```text
/// ┌───────────────────────────────────┬──────────────────────────────────┐
/// │ Element                           │ Emitted as                       │
/// ├───────────────────────────────────┼──────────────────────────────────┤
/// │ has child elements                │ record_start … record_end        │
/// │ no attributes, no text            │ record_start, record_end         │
/// │ (whitespace-only text counts      │                                  │
/// │ as no text)                       │                                  │
/// │ non-whitespace text content       │ property (name = tag)            │
/// │ attributes                        │ property, attributes → params    │
/// │ attributes, no text               │ property with one value ""       │
/// └───────────────────────────────────┴──────────────────────────────────┘
/// ```
///
/// Properties are emitted in one burst at the element's END, since the
/// value is only complete then. Whitespace-only text between child
/// elements is dropped.
#[derive(Debug, Default)]
pub struct WbxmlTokenSource {
    config: DecoderConfig,
    header: Option<WbxmlHeader>,
}

impl WbxmlTokenSource {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            header: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Header of the most recently parsed document, if parsing got that far.
    #[must_use]
    pub fn header(&self) -> Option<&WbxmlHeader> {
        self.header.as_ref()
    }
}

impl TokenSource for WbxmlTokenSource {
    fn reset(&mut self) {
        self.header = None;
    }

    fn parse(&mut self, input: &mut dyn Read, sink: &mut dyn ContentSink) -> Result<(), TokenError> {
        let mut reader = ByteReader::new(input);
        let header = WbxmlHeader::read_from(&mut reader, self.config.max_string_table_len)?;
        debug!(
            version_major = header.version_major(),
            version_minor = header.version_minor(),
            public_id = ?header.public_id,
            charset = header.charset.name(),
            string_table_len = header.string_table.len(),
            "wbxml header"
        );

        let result = BodyParser {
            config: &self.config,
            table: &header.string_table,
            charset: header.charset,
            reader,
            tag_page: 0,
            attr_page: 0,
            open: Vec::new(),
            root_closed: false,
        }
        .run(sink);

        self.header = Some(header);
        result
    }
}

/// An element whose start tag has been read and whose END has not.
struct OpenElement {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    kind: ElementKind,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Undecided,
    Record,
    Property,
}

struct BodyParser<'a, R> {
    config: &'a DecoderConfig,
    table: &'a StringTable,
    charset: Charset,
    reader: ByteReader<R>,
    tag_page: u8,
    attr_page: u8,
    open: Vec<OpenElement>,
    root_closed: bool,
}

impl<R: Read> BodyParser<'_, R> {
    fn run(mut self, sink: &mut dyn ContentSink) -> Result<(), TokenError> {
        sink.document_start()?;

        loop {
            let offset = self.reader.position();
            let Some(tok) = self.reader.try_read_u8()? else {
                break;
            };

            match tok {
                token::SWITCH_PAGE => {
                    if self.root_closed {
                        return Err(TokenError::TrailingData { token: tok, offset });
                    }
                    self.tag_page = self.reader.read_u8()?;
                    trace!(page = self.tag_page, "switch tag page");
                }
                token::END => self.end_element(offset, sink)?,
                token::ENTITY => {
                    let text = self.read_entity(offset)?;
                    self.text(&text, offset)?;
                }
                token::STR_I => {
                    let text = self.read_inline_string()?;
                    self.text(&text, offset)?;
                }
                token::STR_T => {
                    let text = self.read_table_string()?;
                    self.text(&text, offset)?;
                }
                token::OPAQUE => {
                    let text = self.read_opaque()?;
                    self.text(&text, offset)?;
                }
                token::PI => {
                    self.read_attributes()?;
                }
                t if token::is_extension(t) => {
                    return Err(TokenError::UnsupportedExtension { token: t, offset });
                }
                t => self.start_element(TagToken::from_raw(t), offset, sink)?,
            }
        }

        if !self.open.is_empty() {
            return Err(TokenError::Truncated {
                open: self.open.len(),
                offset: self.reader.position(),
            });
        }
        if !self.root_closed {
            return Err(TokenError::MissingRoot);
        }

        sink.document_end()?;
        Ok(())
    }

    fn start_element(
        &mut self,
        tag: TagToken,
        offset: usize,
        sink: &mut dyn ContentSink,
    ) -> Result<(), TokenError> {
        if self.root_closed {
            return Err(TokenError::TrailingData {
                token: tag.raw(),
                offset,
            });
        }
        if self.open.len() >= self.config.max_depth {
            return Err(TokenError::TooDeep {
                limit: self.config.max_depth,
            });
        }

        let name = if tag.is_literal() {
            self.read_table_string()?
        } else {
            self.tag_name(tag.identity())?
        };
        let attrs = if tag.has_attributes() {
            self.read_attributes()?
        } else {
            Vec::new()
        };
        trace!(name = name.as_str(), offset, attrs = attrs.len(), "start tag");

        if let Some(parent) = self.open.last_mut() {
            match parent.kind {
                ElementKind::Undecided => {
                    if !parent.attrs.is_empty() {
                        return Err(TokenError::AttributedRecord {
                            element: parent.name.clone(),
                        });
                    }
                    sink.record_start(&parent.name)?;
                    parent.kind = ElementKind::Record;
                    parent.text.clear();
                }
                ElementKind::Record => {}
                ElementKind::Property => {
                    return Err(TokenError::MixedContent {
                        element: parent.name.clone(),
                    });
                }
            }
        }

        let element = OpenElement {
            name,
            attrs,
            text: String::new(),
            kind: ElementKind::Undecided,
        };
        if tag.has_content() {
            self.open.push(element);
        } else {
            self.close(element, sink)?;
        }
        Ok(())
    }

    fn end_element(&mut self, offset: usize, sink: &mut dyn ContentSink) -> Result<(), TokenError> {
        let element = self
            .open
            .pop()
            .ok_or(TokenError::UnbalancedEnd { offset })?;
        self.close(element, sink)
    }

    /// Emit the closing events for an element that has just ended.
    fn close(&mut self, element: OpenElement, sink: &mut dyn ContentSink) -> Result<(), TokenError> {
        match element.kind {
            ElementKind::Record => sink.record_end()?,
            // Undecided means any text seen so far is whitespace.
            ElementKind::Undecided if element.attrs.is_empty() => {
                sink.record_start(&element.name)?;
                sink.record_end()?;
            }
            ElementKind::Undecided | ElementKind::Property => {
                sink.property_start()?;
                sink.property_name(&element.name)?;
                for (param_type, value) in &element.attrs {
                    sink.property_param_type(param_type)?;
                    sink.property_param_value(value)?;
                }
                sink.property_values(self.config.split_values(element.text))?;
                sink.property_end()?;
            }
        }

        if self.open.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn text(&mut self, text: &str, offset: usize) -> Result<(), TokenError> {
        let Some(element) = self.open.last_mut() else {
            return Err(TokenError::ContentOutsideRoot { offset });
        };

        match element.kind {
            ElementKind::Record => {
                if !text.trim().is_empty() {
                    return Err(TokenError::MixedContent {
                        element: element.name.clone(),
                    });
                }
            }
            ElementKind::Undecided => {
                element.text.push_str(text);
                if !element.text.trim().is_empty() {
                    element.kind = ElementKind::Property;
                }
            }
            ElementKind::Property => element.text.push_str(text),
        }
        Ok(())
    }

    /// Read an attribute list up to and including its END.
    ///
    /// Each attribute is a start token (name plus optional value prefix)
    /// followed by any number of value fragments.
    fn read_attributes(&mut self) -> Result<Vec<(String, String)>, TokenError> {
        let mut attrs = Vec::new();
        let mut current: Option<(String, String)> = None;

        loop {
            let offset = self.reader.position();
            let tok = self.reader.read_u8()?;

            let fragment = match tok {
                token::END => break,
                token::SWITCH_PAGE => {
                    self.attr_page = self.reader.read_u8()?;
                    continue;
                }
                token::LITERAL => {
                    let name = self.read_table_string()?;
                    attrs.extend(current.replace((name, String::new())));
                    continue;
                }
                token::STR_I => self.read_inline_string()?,
                token::STR_T => self.read_table_string()?,
                token::ENTITY => self.read_entity(offset)?,
                token::OPAQUE => self.read_opaque()?,
                t if token::is_extension(t) => {
                    return Err(TokenError::UnsupportedExtension { token: t, offset });
                }
                token::PI | token::LITERAL_C | token::LITERAL_A | token::LITERAL_AC => {
                    return Err(TokenError::UnexpectedToken { token: tok, offset });
                }
                t if t < 0x80 => {
                    let start = self.attr_start(t)?;
                    attrs.extend(current.replace(start));
                    continue;
                }
                t => self.attr_value(t)?,
            };

            match current.as_mut() {
                Some((_, value)) => value.push_str(&fragment),
                None => return Err(TokenError::DanglingAttributeValue { offset }),
            }
        }

        attrs.extend(current);
        Ok(attrs)
    }

    fn tag_name(&self, identity: u8) -> Result<String, TokenError> {
        match self.config.code_pages.tag(self.tag_page, identity) {
            Some(name) => Ok(name.to_owned()),
            None if self.config.strict_vocabulary => Err(TokenError::UnknownTag {
                page: self.tag_page,
                token: identity,
            }),
            None => Ok(unknown_name(self.tag_page, identity)),
        }
    }

    fn attr_start(&self, tok: u8) -> Result<(String, String), TokenError> {
        match self.config.code_pages.attr_start(self.attr_page, tok) {
            Some(start) => Ok((start.name.clone(), start.value_prefix.clone())),
            None if self.config.strict_vocabulary => Err(TokenError::UnknownAttribute {
                page: self.attr_page,
                token: tok,
            }),
            None => Ok((unknown_name(self.attr_page, tok), String::new())),
        }
    }

    fn attr_value(&self, tok: u8) -> Result<String, TokenError> {
        match self.config.code_pages.attr_value(self.attr_page, tok) {
            Some(value) => Ok(value.to_owned()),
            None if self.config.strict_vocabulary => Err(TokenError::UnknownAttribute {
                page: self.attr_page,
                token: tok,
            }),
            None => Ok(unknown_name(self.attr_page, tok)),
        }
    }

    fn read_inline_string(&mut self) -> Result<String, TokenError> {
        let offset = self.reader.position();
        let bytes = self.reader.read_terminated(self.config.max_string_len)?;
        Ok(self.charset.decode(bytes, offset)?)
    }

    fn read_table_string(&mut self) -> Result<String, TokenError> {
        let index = self.reader.read_mb_u_int32()?;
        Ok(self.table.get_str(index, self.charset)?)
    }

    fn read_entity(&mut self, offset: usize) -> Result<String, TokenError> {
        let code = self.reader.read_mb_u_int32()?;
        char::from_u32(code)
            .map(String::from)
            .ok_or(TokenError::InvalidEntity { code, offset })
    }

    fn read_opaque(&mut self) -> Result<String, TokenError> {
        let offset = self.reader.position();
        let len = self.reader.read_mb_u_int32()? as usize;
        if len > self.config.max_string_len {
            return Err(wbxml_wire::WireError::StringTooLong {
                offset,
                limit: self.config.max_string_len,
            }
            .into());
        }
        let bytes = self.reader.read_bytes(len)?;
        Ok(self.charset.decode(bytes, offset)?)
    }
}
