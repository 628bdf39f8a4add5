use wbxml_types::ModelError;
use wbxml_wire::WireError;

/// Errors returned by [`PrimitiveDecoder`](crate::PrimitiveDecoder).
///
/// Callers only ever see two outcomes: the transport failed, or the bytes
/// did not describe a valid message. Everything below the facade is
/// folded into one of these, with the original error kept as `source()`.
///
/// ```text
///   DecodeError
///   ├── Io(std::io::Error)          ← transport read failed, passed through
///   └── Parser(ParserError)
///       ├── Malformed(TokenError)   ← bad token, truncation, bad strtbl ref
///       └── Structure(ProtocolError)← unbalanced / malformed event sequence
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parser(#[from] ParserError),
}

/// A decode-time failure: the message is unusable.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// The token source could not read the encoding.
    #[error("malformed WBXML")]
    Malformed(#[source] TokenError),

    /// The event sequence did not describe a well-formed message tree.
    #[error("invalid message structure")]
    Structure(#[source] ProtocolError),
}

impl From<TokenError> for DecodeError {
    /// Classify a token source failure. I/O errors other than truncation
    /// stay I/O errors; rejected events become structure errors.
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Io(e) => Self::Io(e),
            TokenError::Rejected(e) => Self::Parser(ParserError::Structure(e)),
            other => Self::Parser(ParserError::Malformed(other)),
        }
    }
}

impl From<ProtocolError> for DecodeError {
    fn from(err: ProtocolError) -> Self {
        Self::Parser(ParserError::Structure(err))
    }
}

/// Structural inconsistencies detected by a content sink.
///
/// These describe event sequences that cannot be assembled into a tree,
/// regardless of where the events came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("document already started")]
    AlreadyStarted,

    #[error("event received outside a document")]
    NotStarted,

    #[error("document ended with {open} unclosed record(s)")]
    UnclosedRecords { open: usize },

    #[error("record or document ended inside an open property")]
    UnclosedProperty,

    #[error("document contains no record")]
    EmptyDocument,

    #[error("second top-level record {record_type}")]
    MultipleRoots { record_type: String },

    #[error("record end without a matching record start")]
    UnmatchedRecordEnd,

    #[error("record {record_type} started inside a property")]
    RecordInsideProperty { record_type: String },

    #[error("property started while another property is open")]
    NestedProperty,

    #[error("property started outside any record")]
    PropertyOutsideRecord,

    #[error("{event} received with no open property")]
    NoOpenProperty { event: &'static str },

    #[error("property name set twice")]
    DuplicatePropertyName,

    #[error("{event} received before the property name")]
    NameNotSet { event: &'static str },

    #[error("parameter type {param_type} not followed by its value")]
    DanglingParamType { param_type: String },

    #[error("parameter value without a parameter type")]
    ParamValueWithoutType,

    #[error("parameter received after the property values")]
    ParamAfterValues,

    #[error("property values set twice")]
    DuplicateValues,

    #[error("no completed primitive is available")]
    NoPrimitive,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Failures raised by a [`TokenSource`](crate::TokenSource).
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Header, integer, string table or text decoding failure.
    #[error(transparent)]
    Wire(WireError),

    #[error("unknown tag token {token:#04X} on code page {page}")]
    UnknownTag { page: u8, token: u8 },

    #[error("unknown attribute token {token:#04X} on code page {page}")]
    UnknownAttribute { page: u8, token: u8 },

    #[error("unsupported extension token {token:#04X} at offset {offset}")]
    UnsupportedExtension { token: u8, offset: usize },

    #[error("token {token:#04X} not allowed here (offset {offset})")]
    UnexpectedToken { token: u8, offset: usize },

    #[error("invalid character entity {code:#X} at offset {offset}")]
    InvalidEntity { code: u32, offset: usize },

    #[error("attribute value at offset {offset} has no attribute name")]
    DanglingAttributeValue { offset: usize },

    #[error("END at offset {offset} with no open element")]
    UnbalancedEnd { offset: usize },

    #[error("element {element} mixes text and child elements")]
    MixedContent { element: String },

    #[error("element {element} has both attributes and child elements")]
    AttributedRecord { element: String },

    #[error("text outside the root element at offset {offset}")]
    ContentOutsideRoot { offset: usize },

    #[error("element nesting exceeds depth limit {limit}")]
    TooDeep { limit: usize },

    #[error("token {token:#04X} after the root element at offset {offset}")]
    TrailingData { token: u8, offset: usize },

    #[error("document body has no root element")]
    MissingRoot,

    #[error("input ended at offset {offset} with {open} unclosed element(s)")]
    Truncated { open: usize, offset: usize },

    #[error("message exceeds {limit} bytes")]
    MessageTooLarge { limit: usize },

    /// The content sink refused an event.
    #[error("event rejected by content sink")]
    Rejected(#[from] ProtocolError),

    /// Transport failure from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<WireError> for TokenError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::Io(e) => Self::Io(e),
            other => Self::Wire(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn io_stays_io() {
        let err: DecodeError =
            TokenError::from(WireError::Io(io::Error::other("boom"))).into();
        assert!(matches!(err, DecodeError::Io(_)));
    }

    #[test]
    fn truncation_is_a_parser_error() {
        let err: DecodeError = TokenError::from(WireError::UnexpectedEof { offset: 3 }).into();
        assert!(matches!(
            err,
            DecodeError::Parser(ParserError::Malformed(TokenError::Wire(
                WireError::UnexpectedEof { offset: 3 }
            )))
        ));
    }

    #[test]
    fn rejected_events_become_structure_errors() {
        let err: DecodeError = TokenError::Rejected(ProtocolError::UnmatchedRecordEnd).into();
        assert!(matches!(
            err,
            DecodeError::Parser(ParserError::Structure(ProtocolError::UnmatchedRecordEnd))
        ));
    }

    #[test]
    fn cause_chain_is_preserved() {
        let err = ParserError::Structure(ProtocolError::UnclosedRecords { open: 2 });
        assert_eq!(err.to_string(), "invalid message structure");
        assert_eq!(
            err.source().unwrap().to_string(),
            "document ended with 2 unclosed record(s)"
        );
    }
}
