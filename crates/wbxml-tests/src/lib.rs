//! Fixture builder for the integration tests and benchmarks.
//!
//! [`WbxmlWriter`] assembles WBXML byte payloads token by token. It does no
//! validation of its own, so tests can build malformed documents as
//! easily as well-formed ones.
//!
//! ```text
//! let bytes = WbxmlWriter::new()
//!     .tag(0x05)                       // <Msg>
//!     .tag(0x06).str_i("ok").end()     //   <status>ok</status>
//!     .end()                           // </Msg>
//!     .finish();
//! ```

use wbxml_decoder::DecoderConfig;
use wbxml_wire::CodePages;
use wbxml_wire::mb_uint::{MAX_MB_UINT_BYTES, encode_mb_u_int32};
use wbxml_wire::token::{self, TagToken};

/// Byte-level builder for WBXML documents.
#[derive(Clone, Debug)]
pub struct WbxmlWriter {
    version: u8,
    public_id: PublicIdField,
    charset: u32,
    table: Vec<u8>,
    body: Vec<u8>,
}

#[derive(Clone, Debug)]
enum PublicIdField {
    Known(u32),
    Literal(u32),
}

impl Default for WbxmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl WbxmlWriter {
    /// WBXML 1.3, unknown public id, UTF-8, empty string table.
    pub fn new() -> Self {
        Self {
            version: 0x03,
            public_id: PublicIdField::Known(1),
            charset: 106,
            table: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn public_id(mut self, id: u32) -> Self {
        self.public_id = PublicIdField::Known(id);
        self
    }

    /// Use the string-table entry at `index` as the public identifier.
    pub fn public_id_literal(mut self, index: u32) -> Self {
        self.public_id = PublicIdField::Literal(index);
        self
    }

    pub fn charset(mut self, mib: u32) -> Self {
        self.charset = mib;
        self
    }

    /// Append a NUL-terminated entry to the string table and return its
    /// index.
    pub fn intern(&mut self, s: &str) -> u32 {
        let index = u32::try_from(self.table.len()).unwrap_or(u32::MAX);
        self.table.extend_from_slice(s.as_bytes());
        self.table.push(0);
        index
    }

    /// Append raw bytes to the string table.
    pub fn raw_table(mut self, bytes: &[u8]) -> Self {
        self.table.extend_from_slice(bytes);
        self
    }

    pub fn switch_page(self, page: u8) -> Self {
        self.byte(token::SWITCH_PAGE).byte(page)
    }

    /// Start tag with content and no attributes.
    pub fn tag(self, identity: u8) -> Self {
        self.byte(identity | TagToken::HAS_CONTENT)
    }

    /// Start tag with neither content nor attributes.
    pub fn empty(self, identity: u8) -> Self {
        self.byte(identity)
    }

    /// Start tag with attributes. The caller writes the attribute list,
    /// closed by [`end`](Self::end).
    pub fn tag_with_attrs(self, identity: u8, content: bool) -> Self {
        let mut raw = identity | TagToken::HAS_ATTRIBUTES;
        if content {
            raw |= TagToken::HAS_CONTENT;
        }
        self.byte(raw)
    }

    /// Literal start tag (name from the string table) with content.
    pub fn literal_tag(self, index: u32) -> Self {
        self.byte(token::LITERAL_C).mb(index)
    }

    pub fn attr(self, start: u8) -> Self {
        self.byte(start)
    }

    pub fn attr_literal(self, index: u32) -> Self {
        self.byte(token::LITERAL).mb(index)
    }

    pub fn attr_value(self, value: u8) -> Self {
        self.byte(value)
    }

    pub fn str_i(mut self, s: &str) -> Self {
        self.body.push(token::STR_I);
        self.body.extend_from_slice(s.as_bytes());
        self.body.push(0);
        self
    }

    pub fn str_t(self, index: u32) -> Self {
        self.byte(token::STR_T).mb(index)
    }

    pub fn entity(self, code: u32) -> Self {
        self.byte(token::ENTITY).mb(code)
    }

    pub fn opaque(mut self, data: &[u8]) -> Self {
        let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
        self = self.byte(token::OPAQUE).mb(len);
        self.body.extend_from_slice(data);
        self
    }

    /// Processing instruction with a single attribute.
    pub fn pi(self, target: u8, value: &str) -> Self {
        self.byte(token::PI).byte(target).str_i(value).end()
    }

    pub fn end(self) -> Self {
        self.byte(token::END)
    }

    pub fn byte(mut self, b: u8) -> Self {
        self.body.push(b);
        self
    }

    pub fn mb(mut self, value: u32) -> Self {
        push_mb(&mut self.body, value);
        self
    }

    /// Header followed by the body written so far.
    pub fn finish(&self) -> Vec<u8> {
        let mut out = vec![self.version];
        match self.public_id {
            PublicIdField::Known(id) => push_mb(&mut out, id),
            PublicIdField::Literal(index) => {
                push_mb(&mut out, 0);
                push_mb(&mut out, index);
            }
        }
        if self.version != 0x00 {
            push_mb(&mut out, self.charset);
        }
        push_mb(&mut out, u32::try_from(self.table.len()).unwrap_or(u32::MAX));
        out.extend_from_slice(&self.table);
        out.extend_from_slice(&self.body);
        out
    }
}

fn push_mb(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; MAX_MB_UINT_BYTES];
    let n = encode_mb_u_int32(value, &mut buf);
    out.extend_from_slice(&buf[..n]);
}

/// Tag identities of the message dialect used across the test suite.
pub mod tags {
    pub const MSG: u8 = 0x05;
    pub const STATUS: u8 = 0x06;
    pub const NAME: u8 = 0x07;
    pub const CONTACT: u8 = 0x08;
    pub const NOTE: u8 = 0x09;
    pub const EMPTY: u8 = 0x0A;
    /// Page 1.
    pub const PRESENCE: u8 = 0x05;
}

/// Attribute tokens of the test dialect.
pub mod attrs {
    pub const LANGUAGE: u8 = 0x05;
    pub const TYPE_HOME: u8 = 0x06;
    pub const PHONE: u8 = 0x85;
}

/// Code pages for the test dialect.
pub fn code_pages() -> CodePages {
    let mut pages = CodePages::new();
    pages
        .insert_tag(0, tags::MSG, "Msg")
        .insert_tag(0, tags::STATUS, "status")
        .insert_tag(0, tags::NAME, "Name")
        .insert_tag(0, tags::CONTACT, "Contact")
        .insert_tag(0, tags::NOTE, "note")
        .insert_tag(0, tags::EMPTY, "Empty")
        .insert_tag(1, tags::PRESENCE, "Presence")
        .insert_attr_start(0, attrs::LANGUAGE, "LANGUAGE", "")
        .insert_attr_start(0, attrs::TYPE_HOME, "TYPE", "home-")
        .insert_attr_value(0, attrs::PHONE, "phone");
    pages
}

/// Decoder configuration for the test dialect with default limits.
pub fn config() -> DecoderConfig {
    DecoderConfig::with_code_pages(code_pages())
}
