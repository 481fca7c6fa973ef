//! Context Schema.
//!
//! The context object graph and its positional binary encoding. Records write their scalar
//! fields in declaration order followed by their header map, without any field tags, the
//! decoder reads them back in the same order.
//!
//! ```not_rust
//! Context    := Request Response
//! Request    := nil | error | URI:str Method:str ContentLength:i64 Protocol:str RemoteIP:str Body:bytes HeaderMap
//! Response   := nil | error | StatusCode:i32 Body:bytes HeaderMap
//! HeaderMap  := nil | MapHeader(count, string, any) (Key:str StringList)*
//! StringList := nil | error | SliceHeader(count, string) str*
//! ```
//!
//! Record shapes are declared once with [`record!`], which generates the struct and its
//! [`Encode`] and [`Decode`] implementation.
use crate::codec::{Buffer, Encoder, Reader, fits};
use crate::error::Error;

#[macro_use]
mod record;
mod model;
mod headers;

pub use model::{Context, Request, Response, StringList};
pub use headers::{HeaderMap, encode_headers};

/// Positional encoding.
pub trait Encode {
    /// Append encoded `self` into `buf`.
    fn encode(&self, buf: &mut Buffer) -> Result<(), Error>;
}

/// Positional decoding into existing value.
///
/// Fields decoded before a failure are left as decoded, there is no rollback.
pub trait Decode {
    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), Error>;
}

/// Encode `value` into `buf`.
///
/// # Errors
///
/// Returns [`Error::Encode`] if a string, body or collection is too long for its length
/// prefix.
#[inline]
pub fn internal_encode<T: Encode + ?Sized>(value: &T, buf: &mut Buffer) -> Result<(), Error> {
    value.encode(buf)
}

/// Encode an error sentinel into `buf`, in place of a value.
pub fn internal_error(err: &dyn std::error::Error, buf: &mut Buffer) -> Result<(), Error> {
    let message = err.to_string();
    fits(message.len())?;
    buf.encode_error(Box::<dyn std::error::Error>::from(message))?;
    Ok(())
}

/// Decode `bytes` into `target`.
///
/// The reader borrows `bytes` for the duration of the call.
///
/// # Errors
///
/// Returns [`Error::NilTarget`] if `target` is `None`, or any error while decoding.
pub fn decode_into<T: Decode + ?Sized>(target: Option<&mut T>, bytes: &[u8]) -> Result<(), Error> {
    let Some(target) = target else {
        return Err(Error::NilTarget);
    };
    target.decode(&mut Reader::new(bytes))
}

#[cfg(test)]
mod test;
