//! Global tokens and the tag token bit layout.
//!
//! Global tokens have the same meaning on every code page, in both tag and
//! attribute state:
//!
//! ```text
//! ┌──────────────┬──────┬────────────────────────────────────────────┐
//! │ Token        │ Byte │ Followed by                                │
//! ├──────────────┼──────┼────────────────────────────────────────────┤
//! │ SWITCH_PAGE  │ 0x00 │ u8 page index                              │
//! │ END          │ 0x01 │ -                                          │
//! │ ENTITY       │ 0x02 │ mb_u_int32 character code                  │
//! │ STR_I        │ 0x03 │ NUL-terminated inline string               │
//! │ LITERAL*     │ 0x04 │ mb_u_int32 string table index (tag/attr)   │
//! │ EXT_I_0..2   │ 0x40 │ inline string                              │
//! │ PI           │ 0x43 │ attribute list, END                        │
//! │ EXT_T_0..2   │ 0x80 │ mb_u_int32                                 │
//! │ STR_T        │ 0x83 │ mb_u_int32 string table index              │
//! │ EXT_0..2     │ 0xC0 │ -                                          │
//! │ OPAQUE       │ 0xC3 │ mb_u_int32 length, bytes                   │
//! └──────────────┴──────┴────────────────────────────────────────────┘
//! ```

pub const SWITCH_PAGE: u8 = 0x00;
pub const END: u8 = 0x01;
pub const ENTITY: u8 = 0x02;
pub const STR_I: u8 = 0x03;
pub const LITERAL: u8 = 0x04;
pub const EXT_I_0: u8 = 0x40;
pub const EXT_I_1: u8 = 0x41;
pub const EXT_I_2: u8 = 0x42;
pub const PI: u8 = 0x43;
pub const LITERAL_C: u8 = 0x44;
pub const EXT_T_0: u8 = 0x80;
pub const EXT_T_1: u8 = 0x81;
pub const EXT_T_2: u8 = 0x82;
pub const STR_T: u8 = 0x83;
pub const LITERAL_A: u8 = 0x84;
pub const EXT_0: u8 = 0xC0;
pub const EXT_1: u8 = 0xC1;
pub const EXT_2: u8 = 0xC2;
pub const OPAQUE: u8 = 0xC3;
pub const LITERAL_AC: u8 = 0xC4;

/// Returns true for any of the nine extension tokens.
#[must_use]
pub fn is_extension(token: u8) -> bool {
    matches!(
        token,
        EXT_I_0 | EXT_I_1 | EXT_I_2 | EXT_T_0 | EXT_T_1 | EXT_T_2 | EXT_0 | EXT_1 | EXT_2
    )
}

/// A tag token split into its identity and flag bits.
///
/// Bit layout:
///   bit 7    = attributes follow
///   bit 6    = content follows
///   bits 0-5 = tag identity within the current code page
///
/// The four `LITERAL` forms carry the same two flag bits, with identity 0x04.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagToken(u8);

impl TagToken {
    pub const HAS_ATTRIBUTES: u8 = 0b1000_0000;
    pub const HAS_CONTENT: u8 = 0b0100_0000;
    const IDENTITY_MASK: u8 = 0b0011_1111;

    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    /// Tag identity with both flag bits cleared.
    pub fn identity(self) -> u8 {
        self.0 & Self::IDENTITY_MASK
    }

    pub fn has_attributes(self) -> bool {
        self.0 & Self::HAS_ATTRIBUTES != 0
    }

    pub fn has_content(self) -> bool {
        self.0 & Self::HAS_CONTENT != 0
    }

    /// True when this is one of `LITERAL`, `LITERAL_A`, `LITERAL_C`, `LITERAL_AC`.
    pub fn is_literal(self) -> bool {
        self.identity() == LITERAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_flags() {
        let tag = TagToken::from_raw(0xC5);
        assert_eq!(tag.identity(), 0x05);
        assert!(tag.has_attributes());
        assert!(tag.has_content());

        let bare = TagToken::from_raw(0x05);
        assert!(!bare.has_attributes());
        assert!(!bare.has_content());
    }

    #[test]
    fn literal_forms_share_identity() {
        for raw in [LITERAL, LITERAL_A, LITERAL_C, LITERAL_AC] {
            assert!(TagToken::from_raw(raw).is_literal(), "{raw:#04X}");
        }
        assert!(TagToken::from_raw(LITERAL_A).has_attributes());
        assert!(TagToken::from_raw(LITERAL_C).has_content());
    }

    #[test]
    fn extension_tokens() {
        assert!(is_extension(EXT_I_1));
        assert!(is_extension(EXT_T_2));
        assert!(is_extension(EXT_0));
        assert!(!is_extension(OPAQUE));
        assert!(!is_extension(PI));
    }
}
