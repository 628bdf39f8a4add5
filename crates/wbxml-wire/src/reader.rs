use std::io::{ErrorKind, Read};

use crate::error::WireError;
use crate::mb_uint::MAX_MB_UINT_BYTES;

/// Offset-tracking reader over any [`Read`] source.
///
/// Every read advances `position`, which is reported in errors so a bad
/// payload can be located. A clean end of input (`read` returning 0)
/// mid-token is reported as [`WireError::UnexpectedEof`]; every error the
/// reader returns, whatever its kind, is passed through as
/// [`WireError::Io`] untouched.
///
/// Reads are byte-at-a-time; wrap unbuffered sources in a `BufReader`.
pub struct ByteReader<R> {
    inner: R,
    pos: usize,
}

impl<R: Read> ByteReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read one byte, returning `None` at a clean end of input.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the underlying reader fails.
    pub fn try_read_u8(&mut self) -> Result<Option<u8>, WireError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.pos += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(WireError::Io(e)),
            }
        }
    }

    /// Read one byte; end of input is an error.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input, [`WireError::Io`] otherwise.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        self.try_read_u8()?
            .ok_or(WireError::UnexpectedEof { offset: self.pos })
    }

    /// Read a big-endian base-128 `mb_u_int32`.
    ///
    /// # Errors
    ///
    /// [`WireError::MbUintTooLong`] on overflow, plus the errors of
    /// [`read_u8`](Self::read_u8).
    pub fn read_mb_u_int32(&mut self) -> Result<u32, WireError> {
        let start = self.pos;
        let mut acc: u64 = 0;

        for _ in 0..MAX_MB_UINT_BYTES {
            let byte = self.read_u8()?;
            acc = (acc << 7) | u64::from(byte & 0x7F);
            if acc > u64::from(u32::MAX) {
                return Err(WireError::MbUintTooLong { offset: start });
            }
            if byte & 0x80 == 0 {
                #[allow(clippy::cast_possible_truncation)]
                return Ok(acc as u32);
            }
        }

        Err(WireError::MbUintTooLong { offset: start })
    }

    /// Read exactly `len` bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the input ends cleanly before `len`
    /// bytes, [`WireError::Io`] for any failure of the underlying reader.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => return Err(WireError::UnexpectedEof { offset: self.pos }),
                Ok(n) => {
                    filled += n;
                    self.pos += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(WireError::Io(e)),
            }
        }
        Ok(buf)
    }

    /// Read bytes up to and including a NUL terminator, returning them
    /// without the terminator.
    ///
    /// # Errors
    ///
    /// [`WireError::StringTooLong`] if more than `limit` bytes precede the
    /// terminator, plus the errors of [`read_u8`](Self::read_u8).
    pub fn read_terminated(&mut self, limit: usize) -> Result<Vec<u8>, WireError> {
        let start = self.pos;
        let mut out = Vec::new();
        loop {
            let byte = self.read_u8()?;
            if byte == 0 {
                return Ok(out);
            }
            if out.len() == limit {
                return Err(WireError::StringTooLong {
                    offset: start,
                    limit,
                });
            }
            out.push(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::ConnectionReset, "peer went away"))
        }
    }

    #[test]
    fn tracks_position() {
        let mut reader = ByteReader::new(Cursor::new(vec![0x01, 0x81, 0x20, 0xAA]));
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_mb_u_int32().unwrap(), 0xA0);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.try_read_u8().unwrap(), Some(0xAA));
        assert_eq!(reader.try_read_u8().unwrap(), None);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn eof_reports_offset() {
        let mut reader = ByteReader::new(Cursor::new(vec![0x81]));
        assert!(matches!(
            reader.read_mb_u_int32(),
            Err(WireError::UnexpectedEof { offset: 1 })
        ));
    }

    #[test]
    fn terminated_string() {
        let mut reader = ByteReader::new(Cursor::new(b"abc\0def".to_vec()));
        assert_eq!(reader.read_terminated(16).unwrap(), b"abc");
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn terminated_string_limit() {
        let mut reader = ByteReader::new(Cursor::new(b"abcdef\0".to_vec()));
        assert!(matches!(
            reader.read_terminated(3),
            Err(WireError::StringTooLong { offset: 0, limit: 3 })
        ));
    }

    #[test]
    fn read_bytes_truncated() {
        let mut reader = ByteReader::new(Cursor::new(vec![1, 2]));
        assert!(matches!(
            reader.read_bytes(4),
            Err(WireError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn read_bytes_keeps_reader_eof_as_io() {
        // A transport reporting its own UnexpectedEof is a transport failure,
        // not a short document.
        struct ShortThenEof(Cursor<Vec<u8>>);

        impl Read for ShortThenEof {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                match self.0.read(buf)? {
                    0 => Err(io::Error::new(ErrorKind::UnexpectedEof, "tls close_notify missing")),
                    n => Ok(n),
                }
            }
        }

        let mut reader = ByteReader::new(ShortThenEof(Cursor::new(vec![1, 2])));
        match reader.read_bytes(4) {
            Err(WireError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
            other => panic!("expected Io, got {other:?}"),
        }
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn io_errors_pass_through() {
        let mut reader = ByteReader::new(FailingReader);
        match reader.read_u8() {
            Err(WireError::Io(e)) => assert_eq!(e.kind(), ErrorKind::ConnectionReset),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
