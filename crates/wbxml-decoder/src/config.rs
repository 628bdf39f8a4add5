use wbxml_wire::CodePages;

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_STRING_TABLE_LEN: usize = 1 << 20;
pub const DEFAULT_MAX_STRING_LEN: usize = 1 << 20;
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 16 << 20;

/// Configuration for [`WbxmlTokenSource`](crate::WbxmlTokenSource).
///
/// ```text
/// ┌──────────────────────┬───────────────────────────────────────────────┐
/// │ Field                │ Purpose                                       │
/// ├──────────────────────┼───────────────────────────────────────────────┤
/// │ code_pages           │ Tag / attribute names of the decoded dialect  │
/// │ strict_vocabulary    │ Unknown tokens are errors instead of UNKNOWN_ │
/// │ value_separator      │ Split property text into a value list         │
/// │ max_depth            │ Element nesting limit                         │
/// │ max_string_table_len │ String table size limit (bytes)               │
/// │ max_string_len       │ Inline string / opaque size limit (bytes)     │
/// │ max_message_len      │ Buffered message limit of `decode_async`      │
/// └──────────────────────┴───────────────────────────────────────────────┘
/// ```
///
/// The limits bound how much memory a hostile payload can make the decoder
/// allocate before it is rejected.
#[derive(Clone, Debug)]
pub struct DecoderConfig {
    pub code_pages: CodePages,

    /// When false, tokens missing from `code_pages` decode to names of the
    /// form `UNKNOWN_<page>_<token>`.
    pub strict_vocabulary: bool,

    /// When set, property text is split on this character into multiple
    /// values. When `None`, each property has exactly one value.
    pub value_separator: Option<char>,

    pub max_depth: usize,
    pub max_string_table_len: usize,
    pub max_string_len: usize,

    /// Upper bound on the bytes [`decode_async`](crate::PrimitiveDecoder::decode_async)
    /// buffers before parsing.
    pub max_message_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            code_pages: CodePages::new(),
            strict_vocabulary: false,
            value_separator: None,
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_table_len: DEFAULT_MAX_STRING_TABLE_LEN,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl DecoderConfig {
    /// Default limits with the given vocabulary.
    #[must_use]
    pub fn with_code_pages(code_pages: CodePages) -> Self {
        Self {
            code_pages,
            ..Self::default()
        }
    }

    /// Split property text according to `value_separator`.
    #[must_use]
    pub fn split_values(&self, text: String) -> Vec<String> {
        match self.value_separator {
            Some(sep) => text.split(sep).map(str::to_owned).collect(),
            None => vec![text],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_by_default() {
        let config = DecoderConfig::default();
        assert_eq!(config.split_values("a;b".into()), ["a;b"]);
        assert_eq!(config.split_values(String::new()), [""]);
    }

    #[test]
    fn separator_splits_values() {
        let config = DecoderConfig {
            value_separator: Some(';'),
            ..DecoderConfig::default()
        };
        assert_eq!(config.split_values("Lovelace;Ada;".into()), ["Lovelace", "Ada", ""]);
    }
}
