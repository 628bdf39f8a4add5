#![no_main]

use libfuzzer_sys::fuzz_target;
use wbxml_decoder::{DecodeError, DecoderConfig, PrimitiveDecoder};
use wbxml_wire::CodePages;

// Fuzz target: full message decode from arbitrary bytes.
//
// Catches bugs in:
// - Token dispatch and attribute parsing
// - Element classification (record vs property)
// - Handler state transitions on malformed event streams
// - Limit enforcement (depth, string sizes)
//
// In-memory input must never produce an I/O error.
fuzz_target!(|data: &[u8]| {
    let mut pages = CodePages::new();
    pages
        .insert_tag(0, 0x05, "Msg")
        .insert_tag(0, 0x06, "status")
        .insert_attr_start(0, 0x05, "LANGUAGE", "");

    let config = DecoderConfig {
        max_depth: 32,
        max_string_table_len: 1 << 16,
        max_string_len: 1 << 16,
        value_separator: Some(';'),
        ..DecoderConfig::with_code_pages(pages)
    };

    let mut decoder = PrimitiveDecoder::with_config(config);
    match decoder.decode_bytes(data) {
        Ok(primitive) => {
            assert!(!primitive.primitive_type().is_empty());
            let _ = primitive.to_string();
        }
        Err(DecodeError::Io(e)) => panic!("I/O error from in-memory input: {e}"),
        Err(DecodeError::Parser(_)) => {}
    }
});
