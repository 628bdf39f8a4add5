//! Edge case integration tests for the WBXML decoder.
//!
//! Every malformed or unsupported input must come back as
//! `DecodeError::Parser`, never as a panic, a partial message, or an I/O
//! error. The tests are grouped by the layer that detects the problem:
//!
//! - **Header**: version, charset, string table size, public id reference.
//! - **Tokens**: truncation, bad string table references, extension tokens,
//!   invalid entities, over-long multi-byte integers.
//! - **Element shape**: mixed content, attributes on containers, text or
//!   elements outside the root, empty bodies.
//! - **Limits**: nesting depth and string sizes from `DecoderConfig`.

use wbxml_decoder::{DecodeError, DecoderConfig, ParserError, PrimitiveDecoder, TokenError};
use wbxml_tests::{WbxmlWriter, attrs, config, tags};
use wbxml_wire::WireError;

fn decode_with(payload: &[u8], config: DecoderConfig) -> Result<wbxml_types::Primitive, DecodeError> {
    PrimitiveDecoder::with_config(config).decode_bytes(payload)
}

/// Decode with the test vocabulary and return the token-level failure.
fn malformed(payload: &[u8]) -> TokenError {
    malformed_with(payload, config())
}

fn malformed_with(payload: &[u8], config: DecoderConfig) -> TokenError {
    match decode_with(payload, config) {
        Err(DecodeError::Parser(ParserError::Malformed(e))) => e,
        other => panic!("expected a malformed-input error, got {other:?}"),
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

#[test]
fn empty_input() {
    assert!(matches!(
        malformed(&[]),
        TokenError::Wire(WireError::UnexpectedEof { offset: 0 })
    ));
}

#[test]
fn unsupported_major_version() {
    let payload = WbxmlWriter::new().version(0x13).empty(tags::MSG).finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::UnsupportedVersion { major: 2, minor: 3 })
    ));
}

#[test]
fn unsupported_charset() {
    let payload = WbxmlWriter::new().charset(2026).empty(tags::MSG).finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::UnsupportedCharset { mib: 2026 })
    ));
}

#[test]
fn string_table_over_limit() {
    let payload = WbxmlWriter::new()
        .raw_table(&[b'a'; 64])
        .empty(tags::MSG)
        .finish();
    let config = DecoderConfig {
        max_string_table_len: 16,
        ..config()
    };
    assert!(matches!(
        malformed_with(&payload, config),
        TokenError::Wire(WireError::StringTableTooLarge { len: 64, limit: 16 })
    ));
}

#[test]
fn literal_public_id_out_of_range() {
    let payload = WbxmlWriter::new()
        .public_id_literal(40)
        .empty(tags::MSG)
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::InvalidStringTableOffset { index: 40, .. })
    ));
}

#[test]
fn string_table_shorter_than_declared() {
    // Header declares a 10-byte table but the input ends after 2.
    let payload = [0x03, 0x01, 0x6A, 0x0A, b'a', 0x00];
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::UnexpectedEof { .. })
    ));
}

// ── Tokens ────────────────────────────────────────────────────────────────────

#[test]
fn truncated_inside_element() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::STATUS)
        .str_i("ok")
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Truncated { open: 1, .. }
    ));
}

#[test]
fn truncated_inside_attribute_list() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag_with_attrs(tags::STATUS, true)
        .attr(attrs::LANGUAGE)
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::UnexpectedEof { .. })
    ));
}

#[test]
fn unterminated_inline_string() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::STATUS)
        .byte(wbxml_wire::token::STR_I)
        .byte(b'o')
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::UnexpectedEof { .. })
    ));
}

#[test]
fn string_table_reference_past_end() {
    let mut writer = WbxmlWriter::new();
    writer.intern("abc");
    let payload = writer
        .tag(tags::MSG)
        .tag(tags::STATUS)
        .str_t(99)
        .end()
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::InvalidStringTableOffset { index: 99, len: 4 })
    ));
}

#[test]
fn unterminated_string_table_entry() {
    let payload = WbxmlWriter::new()
        .raw_table(b"abc")
        .tag(tags::MSG)
        .tag(tags::STATUS)
        .str_t(1)
        .end()
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::UnterminatedString { index: 1 })
    ));
}

#[test]
fn over_long_multibyte_integer() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::STATUS)
        .byte(wbxml_wire::token::STR_T)
        .byte(0x81)
        .byte(0x81)
        .byte(0x81)
        .byte(0x81)
        .byte(0x81)
        .byte(0x01)
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::MbUintTooLong { .. })
    ));
}

#[test]
fn extension_tokens_are_rejected() {
    for ext in [0x40, 0x41, 0x42, 0x80, 0x81, 0x82, 0xC0, 0xC1, 0xC2] {
        let payload = WbxmlWriter::new()
            .tag(tags::MSG)
            .byte(ext)
            .byte(0x00)
            .end()
            .finish();
        assert!(
            matches!(malformed(&payload), TokenError::UnsupportedExtension { token, .. } if token == ext),
            "extension token 0x{ext:02X} was not rejected"
        );
    }
}

#[test]
fn invalid_entity() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::NOTE)
        .entity(0xD800)
        .end()
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::InvalidEntity { code: 0xD800, .. }
    ));
}

#[test]
fn attribute_value_before_start() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag_with_attrs(tags::STATUS, false)
        .attr_value(attrs::PHONE)
        .end()
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::DanglingAttributeValue { .. }
    ));
}

#[test]
fn invalid_utf8_text() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::NOTE)
        .byte(wbxml_wire::token::STR_I)
        .byte(0xFF)
        .byte(0x00)
        .end()
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::Wire(WireError::InvalidText { charset: "UTF-8", .. })
    ));
}

// ── Element shape ─────────────────────────────────────────────────────────────

#[test]
fn empty_body() {
    let payload = WbxmlWriter::new().finish();
    assert!(matches!(malformed(&payload), TokenError::MissingRoot));
}

#[test]
fn second_root_element() {
    let payload = WbxmlWriter::new()
        .empty(tags::MSG)
        .empty(tags::MSG)
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::TrailingData { .. }
    ));
}

#[test]
fn page_switch_after_root_element() {
    let payload = WbxmlWriter::new().empty(tags::MSG).switch_page(1).finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::TrailingData {
            token: wbxml_wire::token::SWITCH_PAGE,
            ..
        }
    ));
}

#[test]
fn stray_end_token() {
    let payload = WbxmlWriter::new().empty(tags::MSG).end().finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::UnbalancedEnd { .. }
    ));
}

#[test]
fn text_before_root() {
    let payload = WbxmlWriter::new()
        .str_i("hello")
        .empty(tags::MSG)
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::ContentOutsideRoot { .. }
    ));
}

#[test]
fn text_after_child_elements() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .empty(tags::EMPTY)
        .str_i("stray")
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::MixedContent { element } if element == "Msg"
    ));
}

#[test]
fn child_element_after_text() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::NOTE)
        .str_i("text")
        .empty(tags::EMPTY)
        .end()
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::MixedContent { element } if element == "note"
    ));
}

#[test]
fn container_with_attributes() {
    let payload = WbxmlWriter::new()
        .tag_with_attrs(tags::MSG, true)
        .attr(attrs::LANGUAGE)
        .str_i("en")
        .end()
        .empty(tags::EMPTY)
        .end()
        .finish();
    assert!(matches!(
        malformed(&payload),
        TokenError::AttributedRecord { element } if element == "Msg"
    ));
}

#[test]
fn property_as_root_is_a_structure_error() {
    let payload = WbxmlWriter::new()
        .tag(tags::STATUS)
        .str_i("ok")
        .end()
        .finish();
    assert!(matches!(
        decode_with(&payload, config()),
        Err(DecodeError::Parser(ParserError::Structure(_)))
    ));
}

// ── Vocabulary ────────────────────────────────────────────────────────────────

#[test]
fn strict_vocabulary_rejects_unknown_tag() {
    let payload = WbxmlWriter::new().empty(0x3F).finish();
    let config = DecoderConfig {
        strict_vocabulary: true,
        ..config()
    };
    assert!(matches!(
        malformed_with(&payload, config),
        TokenError::UnknownTag { page: 0, token: 0x3F }
    ));
}

#[test]
fn strict_vocabulary_rejects_unknown_attribute() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag_with_attrs(tags::STATUS, false)
        .attr(0x30)
        .end()
        .end()
        .finish();
    let config = DecoderConfig {
        strict_vocabulary: true,
        ..config()
    };
    assert!(matches!(
        malformed_with(&payload, config),
        TokenError::UnknownAttribute { page: 0, token: 0x30 }
    ));
}

#[test]
fn unknown_page_is_lenient_by_default() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .switch_page(7)
        .empty(0x05)
        .end()
        .finish();
    let primitive = decode_with(&payload, config()).unwrap();
    assert_eq!(primitive.records()[0].record_type(), "UNKNOWN_07_05");
}

// ── Limits ────────────────────────────────────────────────────────────────────

#[test]
fn nesting_depth_limit() {
    let mut writer = WbxmlWriter::new();
    for _ in 0..10 {
        writer = writer.tag(tags::CONTACT);
    }
    for _ in 0..10 {
        writer = writer.end();
    }
    let payload = writer.finish();

    let config = DecoderConfig {
        max_depth: 4,
        ..config()
    };
    assert!(matches!(
        malformed_with(&payload, config),
        TokenError::TooDeep { limit: 4 }
    ));

    // The default limit leaves room for this document.
    decode_with(&payload, wbxml_tests::config()).unwrap();
}

#[test]
fn inline_string_limit() {
    let long = "x".repeat(100);
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::NOTE)
        .str_i(&long)
        .end()
        .end()
        .finish();
    let config = DecoderConfig {
        max_string_len: 32,
        ..config()
    };
    assert!(matches!(
        malformed_with(&payload, config),
        TokenError::Wire(WireError::StringTooLong { limit: 32, .. })
    ));
}

#[test]
fn opaque_limit() {
    let payload = WbxmlWriter::new()
        .tag(tags::MSG)
        .tag(tags::NOTE)
        .opaque(&[b'y'; 100])
        .end()
        .end()
        .finish();
    let config = DecoderConfig {
        max_string_len: 32,
        ..config()
    };
    assert!(matches!(
        malformed_with(&payload, config),
        TokenError::Wire(WireError::StringTooLong { limit: 32, .. })
    ));
}

#[test]
fn large_string_table_index() {
    // Indexes above 127 need multi-byte encodings.
    let mut writer = WbxmlWriter::new();
    writer = writer.raw_table(&[b'-'; 200]);
    let index = writer.intern("deep");
    assert_eq!(index, 200);
    let payload = writer
        .tag(tags::MSG)
        .tag(tags::NOTE)
        .str_t(index)
        .end()
        .end()
        .finish();
    let primitive = decode_with(&payload, config()).unwrap();
    assert_eq!(primitive.property_value("note"), Some("deep"));
}
