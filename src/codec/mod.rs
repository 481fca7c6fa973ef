//! Primitive Binary Codec.
//!
//! Primitive values are encoded by [`polyglot_rs`]. Every value is written with a one byte
//! [`Kind`] tag in front of it. Integers are varint encoded, signed integers are zigzag
//! encoded first. Strings and bytes carry a `u32` length prefix. Collections only write a
//! header: element count and element kinds, the elements themselves follow.
//!
//! ```not_rust
//! nil     := 0x00
//! u32     := 0x0a varint(u32)
//! i32     := 0x0c varint(zigzag(i32))
//! i64     := 0x0d varint(zigzag(i64))
//! string  := 0x05 u32(len) utf8[len]
//! bytes   := 0x04 u32(len) byte[len]
//! error   := 0x06 string(message)
//! slice   := 0x01 kind(elem) u32(count)
//! map     := 0x02 kind(key) kind(value) u32(count)
//! ```
//!
//! Decoding goes through a [`Reader`], a cursor over the borrowed input that lives for one
//! decode call.
use std::io::Cursor;

mod error;
mod reader;

pub use polyglot_rs::{Decoder, DecodingError, Encoder, EncodingError, Kind};
pub use error::{DecodeError, EncodeError};
pub use reader::Reader;

/// Encoding target.
pub type Buffer = Cursor<Vec<u8>>;

/// Clear `buf` for a new encoding, keeping its allocation.
#[inline]
pub fn clear(buf: &mut Buffer) {
    buf.get_mut().clear();
    buf.set_position(0);
}

/// Check that a length fits the `u32` length prefix.
///
/// # Errors
///
/// Returns [`EncodeError::TooLong`] if `len` exceeds `u32::MAX`.
#[inline]
pub const fn fits(len: usize) -> Result<(), EncodeError> {
    if len > u32::MAX as usize {
        return Err(EncodeError::TooLong { len });
    }
    Ok(())
}
