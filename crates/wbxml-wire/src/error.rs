/// Byte-level failures while reading a WBXML document.
///
/// Every variant that points into the input carries the byte `offset` from
/// the start of the document, so a bad payload can be located with a hex
/// dump.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// An `mb_u_int32` ran past 5 bytes or overflowed 32 bits.
    #[error("mb_u_int32 at offset {offset} exceeds 32 bits")]
    MbUintTooLong { offset: usize },

    /// Input ended before a complete token, string or header could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// Version byte with a major version other than 1.
    #[error("unsupported WBXML version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// Charset MIBenum the decoder cannot turn into text.
    #[error("unsupported charset MIBenum {mib}")]
    UnsupportedCharset { mib: u32 },

    /// String table length exceeds the configured limit.
    #[error("string table of {len} bytes exceeds limit {limit}")]
    StringTableTooLarge { len: usize, limit: usize },

    /// A `STR_T`, `LITERAL` or literal public id pointed outside the table.
    #[error("string table reference {index} out of range (table is {len} bytes)")]
    InvalidStringTableOffset { index: u32, len: usize },

    /// A string table entry had no terminating NUL.
    #[error("string table entry at {index} is not NUL-terminated")]
    UnterminatedString { index: u32 },

    /// An inline string or opaque block exceeds the configured limit.
    #[error("string at offset {offset} exceeds limit {limit}")]
    StringTooLong { offset: usize, limit: usize },

    /// Bytes that are not valid text in the document charset.
    #[error("invalid {charset} text at offset {offset}")]
    InvalidText { charset: &'static str, offset: usize },

    /// I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
