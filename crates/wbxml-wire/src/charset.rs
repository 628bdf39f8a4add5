use crate::error::WireError;

/// Document character encodings the decoder can turn into text.
///
/// WBXML identifies the charset by its IANA MIBenum. All three supported
/// encodings terminate inline strings with a single 0x00 byte, which is why
/// multi-byte-terminator encodings such as UTF-16 are rejected up front.
///
/// ```text
/// ┌──────────┬─────────┬─────────────────────────────────┐
/// │ Charset  │ MIBenum │ Notes                           │
/// ├──────────┼─────────┼─────────────────────────────────┤
/// │ Utf8     │ 106     │ also used for MIBenum 0         │
/// │ UsAscii  │ 3       │ bytes >= 0x80 are rejected      │
/// │ Latin1   │ 4       │ ISO-8859-1, maps bytes 1:1      │
/// └──────────┴─────────┴─────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
    UsAscii,
    Latin1,
}

impl Charset {
    pub const MIB_UNKNOWN: u32 = 0;
    pub const MIB_US_ASCII: u32 = 3;
    pub const MIB_LATIN1: u32 = 4;
    pub const MIB_UTF8: u32 = 106;

    /// Resolve a MIBenum. "Unknown" (0) is read as UTF-8.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedCharset`] for any other MIBenum.
    pub fn from_mib(mib: u32) -> Result<Self, WireError> {
        match mib {
            Self::MIB_UNKNOWN | Self::MIB_UTF8 => Ok(Self::Utf8),
            Self::MIB_US_ASCII => Ok(Self::UsAscii),
            Self::MIB_LATIN1 => Ok(Self::Latin1),
            _ => Err(WireError::UnsupportedCharset { mib }),
        }
    }

    pub fn mib(self) -> u32 {
        match self {
            Self::Utf8 => Self::MIB_UTF8,
            Self::UsAscii => Self::MIB_US_ASCII,
            Self::Latin1 => Self::MIB_LATIN1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::UsAscii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode raw bytes read at `offset` into a `String`.
    ///
    /// # Errors
    ///
    /// [`WireError::InvalidText`] if the bytes are not valid in this charset.
    pub fn decode(self, bytes: Vec<u8>, offset: usize) -> Result<String, WireError> {
        let invalid = || WireError::InvalidText {
            charset: self.name(),
            offset,
        };
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|_| invalid()),
            Self::UsAscii if bytes.is_ascii() => String::from_utf8(bytes).map_err(|_| invalid()),
            Self::UsAscii => Err(invalid()),
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}
