#![no_main]

use libfuzzer_sys::fuzz_target;
use wbxml_wire::mb_uint::{decode_mb_u_int32, MAX_MB_UINT_BYTES};

// Fuzz target: mb_u_int32 decoding.
//
// Catches bugs in:
// - Overflow past 32 bits
// - Over-long encodings
// - Truncated continuation bytes
fuzz_target!(|data: &[u8]| {
    if let Ok((_, consumed)) = decode_mb_u_int32(data) {
        assert!(consumed >= 1 && consumed <= MAX_MB_UINT_BYTES);
        assert!(consumed <= data.len());
    }
});
