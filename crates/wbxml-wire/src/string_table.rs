use crate::charset::Charset;
use crate::error::WireError;

/// The document string table.
///
/// A block of NUL-terminated strings that `STR_T`, the `LITERAL` tokens and
/// a literal public id refer to by byte offset. An offset may point into the
/// middle of an entry; the string runs from there to the next NUL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringTable {
    bytes: Vec<u8>,
}

impl StringTable {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw bytes of the string starting at `index`, without the terminator.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidStringTableOffset`] if `index` is past the end.
    /// - [`WireError::UnterminatedString`] if no NUL follows `index`.
    pub fn get(&self, index: u32) -> Result<&[u8], WireError> {
        let start = index as usize;
        let tail = self
            .bytes
            .get(start..)
            .filter(|tail| !tail.is_empty())
            .ok_or(WireError::InvalidStringTableOffset {
                index,
                len: self.bytes.len(),
            })?;

        let end = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(WireError::UnterminatedString { index })?;
        Ok(&tail[..end])
    }

    /// The string at `index`, decoded in `charset`.
    ///
    /// # Errors
    ///
    /// Errors of [`get`](Self::get), plus [`WireError::InvalidText`].
    pub fn get_str(&self, index: u32, charset: Charset) -> Result<String, WireError> {
        let raw = self.get(index)?;
        charset.decode(raw.to_vec(), index as usize)
    }
}
