#![no_main]

use libfuzzer_sys::fuzz_target;
use wbxml_wire::mb_uint::{decode_mb_u_int32, encode_mb_u_int32, MAX_MB_UINT_BYTES};

// Fuzz target: mb_u_int32 encode->decode roundtrip.
//
// Takes 4 bytes of fuzz input as a u32, encodes it, decodes it, and
// asserts both the value and the encoded length survive.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let value = u32::from_be_bytes(data[..4].try_into().unwrap());

    let mut buf = [0u8; MAX_MB_UINT_BYTES];
    let encoded_len = encode_mb_u_int32(value, &mut buf);

    let (decoded, decoded_len) = decode_mb_u_int32(&buf[..encoded_len]).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(decoded_len, encoded_len);
});
