use std::io::{BufReader, Read};

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;
use wbxml_types::Primitive;

use crate::config::{DEFAULT_MAX_MESSAGE_LEN, DecoderConfig};
use crate::error::{DecodeError, TokenError};
use crate::event::ContentSink;
use crate::handler::PrimitiveContentHandler;
use crate::token_source::TokenSource;
use crate::wbxml_source::WbxmlTokenSource;

/// Decodes one message from a byte stream into a [`Primitive`].
///
/// The decoder owns a token source and a content handler and wires one
/// into the other for every call:
///
/// ```text
///   input ──▶ TokenSource::parse ──events──▶ PrimitiveContentHandler
///                                                     │
///                                                     ▼
///                                                 Primitive
/// ```
///
/// Both halves are reset at the start of each decode, so a decoder can be
/// reused after an error. A single decoder is not meant to be shared
/// between threads; create one per worker instead.
///
/// # Example
///
/// ```rust
/// use wbxml_decoder::{DecoderConfig, PrimitiveDecoder};
/// use wbxml_wire::CodePages;
///
/// let mut pages = CodePages::new();
/// pages.insert_tag(0, 0x05, "Msg").insert_tag(0, 0x06, "status");
///
/// // v1.3, unknown public id, UTF-8, empty string table
/// // <Msg><status>ok</status></Msg>
/// let bytes = [
///     0x03, 0x01, 0x6A, 0x00, 0x45, 0x46, 0x03, b'o', b'k', 0x00, 0x01, 0x01,
/// ];
///
/// let mut decoder = PrimitiveDecoder::with_config(DecoderConfig::with_code_pages(pages));
/// let msg = decoder.decode_bytes(&bytes).unwrap();
/// assert_eq!(msg.primitive_type(), "Msg");
/// assert_eq!(msg.property_value("status"), Some("ok"));
/// ```
#[derive(Debug)]
pub struct PrimitiveDecoder<S = WbxmlTokenSource> {
    source: S,
    handler: PrimitiveContentHandler,
    max_message_len: usize,
}

impl<S: Default> Default for PrimitiveDecoder<S> {
    fn default() -> Self {
        Self {
            source: S::default(),
            handler: PrimitiveContentHandler::new(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl PrimitiveDecoder<WbxmlTokenSource> {
    /// A WBXML decoder with an empty vocabulary and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        let max_message_len = config.max_message_len;
        Self::with_source(WbxmlTokenSource::new(config)).with_max_message_len(max_message_len)
    }
}

impl<S: TokenSource> PrimitiveDecoder<S> {
    /// A decoder driven by an arbitrary token source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            handler: PrimitiveContentHandler::new(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }

    /// Limit the bytes [`decode_async`](Self::decode_async) will buffer.
    #[must_use]
    pub fn with_max_message_len(mut self, limit: usize) -> Self {
        self.max_message_len = limit;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Decode exactly one message from `input`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Io`] if reading `input` fails.
    /// - [`DecodeError::Parser`] if the bytes are malformed, truncated, or
    ///   do not describe a single well-formed message.
    pub fn decode<R: Read>(&mut self, input: R) -> Result<Primitive, DecodeError> {
        self.source.reset();
        self.handler.reset();

        let mut input = BufReader::new(input);
        if let Err(err) = self.source.parse(&mut input, &mut self.handler) {
            self.handler.reset();
            let err = DecodeError::from(err);
            debug!(error = %err, "decode failed");
            return Err(err);
        }

        let primitive = self.handler.take_primitive()?;
        debug!(
            primitive_type = primitive.primitive_type(),
            properties = primitive.properties().len(),
            records = primitive.records().len(),
            "decoded message"
        );
        Ok(primitive)
    }

    /// Decode a message held in memory.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode); an in-memory input never produces
    /// [`DecodeError::Io`].
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> Result<Primitive, DecodeError> {
        self.decode(bytes)
    }

    /// Read `input` to the end, then decode it.
    ///
    /// The message is buffered in full before parsing starts, up to the
    /// configured message limit.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode). A stream longer than the limit is
    /// [`TokenError::MessageTooLarge`], classified as malformed.
    pub async fn decode_async<R: AsyncRead + Unpin>(
        &mut self,
        input: R,
    ) -> Result<Primitive, DecodeError> {
        let limit = self.max_message_len;
        let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);

        let mut buf = Vec::new();
        input.take(cap).read_to_end(&mut buf).await?;
        if buf.len() > limit {
            self.source.reset();
            self.handler.reset();
            let err = DecodeError::from(TokenError::MessageTooLarge { limit });
            debug!(error = %err, "decode failed");
            return Err(err);
        }
        self.decode_bytes(&buf)
    }
}
