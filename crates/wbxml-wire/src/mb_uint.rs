use crate::error::WireError;

/// Maximum number of bytes a `u32` can occupy as `mb_u_int32`.
/// ceil(32 / 7) = 5 bytes.
pub const MAX_MB_UINT_BYTES: usize = 5;

/// Encode a `u32` as a WBXML `mb_u_int32` into the provided buffer.
///
/// `mb_u_int32` is big-endian base-128: the most significant 7-bit group
/// comes first and every byte except the last has bit 0x80 set. This is the
/// opposite group order from LEB128.
///
/// # Returns
///
/// The number of bytes written (1–5).
///
/// # Panics
///
/// Panics if `buf` is shorter than the required encoding length.
/// A 5-byte buffer is always sufficient.
///
/// | Value   | Encoded bytes        |
/// |---------|----------------------|
/// | 0       | `[0x00]`             |
/// | 127     | `[0x7F]`             |
/// | 128     | `[0x81, 0x00]`       |
/// | 160     | `[0x81, 0x20]`       |
/// | 16384   | `[0x81, 0x80, 0x00]` |
pub fn encode_mb_u_int32(value: u32, buf: &mut [u8]) -> usize {
    let mut groups = [0u8; MAX_MB_UINT_BYTES];
    let mut len = 0;
    let mut rest = value;
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let group = (rest & 0x7F) as u8;
        groups[len] = group;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }

    for i in 0..len {
        let group = groups[len - 1 - i];
        buf[i] = if i + 1 < len { group | 0x80 } else { group };
    }
    len
}

/// Decode an `mb_u_int32` from the start of `buf`.
///
/// # Returns
///
/// `(decoded_value, bytes_consumed)` on success.
///
/// # Errors
///
/// - [`WireError::MbUintTooLong`] if the value needs more than 5 bytes or
///   does not fit in 32 bits.
/// - [`WireError::UnexpectedEof`] if the slice ends mid-integer.
pub fn decode_mb_u_int32(buf: &[u8]) -> Result<(u32, usize), WireError> {
    let mut acc: u64 = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if i >= MAX_MB_UINT_BYTES {
            return Err(WireError::MbUintTooLong { offset: 0 });
        }

        acc = (acc << 7) | u64::from(byte & 0x7F);
        if acc > u64::from(u32::MAX) {
            return Err(WireError::MbUintTooLong { offset: 0 });
        }

        if byte & 0x80 == 0 {
            #[allow(clippy::cast_possible_truncation)]
            return Ok((acc as u32, i + 1));
        }
    }

    Err(WireError::UnexpectedEof { offset: buf.len() })
}
