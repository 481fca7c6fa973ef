use std::io::Cursor;
use std::ops::{Deref, DerefMut};

use polyglot_rs::{Decoder, DecodingError, Kind};

use super::DecodeError;
use crate::error::RemoteError;

/// Decoder cursor over borrowed input, held for the duration of one decode call.
///
/// Primitive decoding is provided by [`Decoder`] through deref. The sentinel checks are
/// inherent, they peek before consuming anything. Strings and bytes are also inherent, their
/// length prefix is checked against the remaining input before anything is allocated.
#[derive(Debug)]
pub struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    /// Returns the current offset into the input.
    #[inline]
    pub fn offset(&self) -> usize {
        usize::try_from(self.cursor.position()).unwrap_or(usize::MAX)
    }

    /// Remaining undecoded bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.offset())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the kind tag of the next value without consuming it.
    #[inline]
    pub fn peek_kind(&self) -> Option<u8> {
        self.cursor.get_ref().get(self.offset()).copied()
    }

    /// Consume the nil marker if the next value is one.
    ///
    /// Returns `false` at the end of input.
    #[inline]
    pub fn decode_nil(&mut self) -> bool {
        self.cursor.decode_none()
    }

    /// Consume the error sentinel if the next value is one.
    ///
    /// Returns `Ok(None)` and consumes nothing if the next value is not an error.
    pub fn decode_error(&mut self) -> Result<Option<RemoteError>, DecodeError> {
        // the cursor consumes a lone trailing byte on mismatch
        if self.peek_kind() != Some(Kind::Error as u8) {
            return Ok(None);
        }
        let err = self.cursor.decode_error()?;
        Ok(Some(RemoteError::new(err.to_string())))
    }

    /// Decode a string, see [`Decoder::decode_string`].
    pub fn decode_string(&mut self) -> Result<String, DecodingError> {
        self.check_len(Kind::String as u8, DecodingError::InvalidString)?;
        self.cursor.decode_string()
    }

    /// Decode bytes, see [`Decoder::decode_bytes`].
    pub fn decode_bytes(&mut self) -> Result<Vec<u8>, DecodingError> {
        self.check_len(Kind::Bytes as u8, DecodingError::InvalidBytes)?;
        self.cursor.decode_bytes()
    }

    /// Reject a length prefix larger than the remaining input.
    ///
    /// Any other malformed input is left for the codec to report.
    fn check_len(&self, kind: u8, err: DecodingError) -> Result<(), DecodingError> {
        if self.peek_kind() != Some(kind) {
            return Ok(());
        }
        let rest = self.cursor.get_ref().get(self.offset() + 1..).unwrap_or_default();
        let mut ahead = Cursor::new(rest);
        let Ok(len) = ahead.decode_u32() else {
            return Ok(());
        };
        let available = rest.len().saturating_sub(ahead.position() as usize);
        if len as usize > available {
            return Err(err);
        }
        Ok(())
    }
}

impl<'a> Deref for Reader<'a> {
    type Target = Cursor<&'a [u8]>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl DerefMut for Reader<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}
