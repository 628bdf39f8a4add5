use std::io::Read;

use crate::charset::Charset;
use crate::error::WireError;
use crate::reader::ByteReader;
use crate::string_table::StringTable;

/// Highest version byte accepted: major 1, any minor.
pub const MAX_VERSION: u8 = 0x0F;

/// Version 1.0 documents have no charset field.
pub const VERSION_1_0: u8 = 0x00;

/// Document type identifier from the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicId {
    /// A registered numeric identifier (1 means "unknown").
    Known(u32),
    /// A formal public identifier string taken from the string table.
    Literal(String),
}

impl PublicId {
    pub const UNKNOWN: u32 = 1;
}

/// WBXML document header — everything before the first body token.
///
/// ```text
/// ┌───────────┬─────────────┬──────────────────────────────────────────┐
/// │ Field     │ Encoding    │ Notes                                    │
/// ├───────────┼─────────────┼──────────────────────────────────────────┤
/// │ version   │ u8          │ high nibble = major - 1, low = minor     │
/// │ publicid  │ mb_u_int32  │ 0 → followed by string table index       │
/// │ charset   │ mb_u_int32  │ IANA MIBenum, absent in version 1.0      │
/// │ strtbl    │ mb_u_int32  │ length, then that many bytes             │
/// └───────────┴─────────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WbxmlHeader {
    pub version: u8,
    pub public_id: PublicId,
    pub charset: Charset,
    pub string_table: StringTable,
}

impl WbxmlHeader {
    /// Major version number (1 for every accepted document).
    pub fn version_major(&self) -> u8 {
        (self.version >> 4) + 1
    }

    pub fn version_minor(&self) -> u8 {
        self.version & 0x0F
    }

    /// Read and validate the header from the start of a document.
    ///
    /// A literal public id is resolved against the string table, which comes
    /// after it on the wire.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnsupportedVersion`] for a major version other than 1.
    /// - [`WireError::UnsupportedCharset`] for an unknown MIBenum.
    /// - [`WireError::StringTableTooLarge`] if the table exceeds
    ///   `max_string_table_len`.
    /// - [`WireError::InvalidStringTableOffset`] /
    ///   [`WireError::UnterminatedString`] for a bad literal public id.
    /// - [`WireError::UnexpectedEof`] / [`WireError::Io`] from the reader.
    pub fn read_from<R: Read>(
        reader: &mut ByteReader<R>,
        max_string_table_len: usize,
    ) -> Result<Self, WireError> {
        let version = reader.read_u8()?;
        if version > MAX_VERSION {
            return Err(WireError::UnsupportedVersion {
                major: (version >> 4) + 1,
                minor: version & 0x0F,
            });
        }

        let raw_public_id = reader.read_mb_u_int32()?;
        let literal_index = if raw_public_id == 0 {
            Some(reader.read_mb_u_int32()?)
        } else {
            None
        };

        let charset = if version == VERSION_1_0 {
            Charset::Utf8
        } else {
            Charset::from_mib(reader.read_mb_u_int32()?)?
        };

        let table_len = reader.read_mb_u_int32()? as usize;
        if table_len > max_string_table_len {
            return Err(WireError::StringTableTooLarge {
                len: table_len,
                limit: max_string_table_len,
            });
        }
        let string_table = StringTable::new(reader.read_bytes(table_len)?);

        let public_id = match literal_index {
            Some(index) => PublicId::Literal(string_table.get_str(index, charset)?),
            None => PublicId::Known(raw_public_id),
        };

        Ok(Self {
            version,
            public_id,
            charset,
            string_table,
        })
    }
}
