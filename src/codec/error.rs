//! Primitive codec errors.
use polyglot_rs::{DecodingError, EncodingError};

/// An error that can occur when decoding primitive values.
///
/// Holds the primitive that could not be read, the input was either truncated or held a
/// different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    value: &'static str,
}

impl DecodeError {
    /// Returns the name of the primitive that could not be read, e.g: `"string"`.
    #[inline]
    pub const fn value(&self) -> &'static str {
        self.value
    }
}

impl From<DecodingError> for DecodeError {
    fn from(err: DecodingError) -> Self {
        use DecodingError as E;
        let value = match err {
            E::InvalidNone => "nil",
            E::InvalidArray => "slice",
            E::InvalidMap => "map",
            E::InvalidBytes => "bytes",
            E::InvalidString => "string",
            E::InvalidError => "error",
            E::InvalidBool => "bool",
            E::InvalidU8 => "u8",
            E::InvalidU16 => "u16",
            E::InvalidU32 => "u32",
            E::InvalidU64 => "u64",
            E::InvalidI32 => "i32",
            E::InvalidI64 => "i64",
            E::InvalidF32 => "f32",
            E::InvalidF64 => "f64",
            E::InvalidEnum => "enum",
            E::InvalidStruct => "struct",
        };
        Self { value }
    }
}

impl std::error::Error for DecodeError { }
impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid or truncated {}", self.value)
    }
}

// ===== Encode Error =====

/// An error that can occur when encoding primitive values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// Writing into the buffer failed.
    Write,
    /// Length does not fit the `u32` length prefix.
    TooLong {
        len: usize,
    },
}

impl From<EncodingError> for EncodeError {
    #[inline]
    fn from(_: EncodingError) -> Self {
        Self::Write
    }
}

impl std::error::Error for EncodeError { }
impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write => f.write_str("buffer write failed"),
            Self::TooLong { len } => write!(f, "length {len} exceeds u32 prefix"),
        }
    }
}
