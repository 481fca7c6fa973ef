//! Error types that can occur during an exchange.
use crate::bridge::{BoundsError, ResizeError};
use crate::codec::{DecodeError, DecodingError, EncodeError, EncodingError};

/// An error that can occur while encoding, decoding, or exchanging a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed, truncated or short buffer.
    Decode(DecodeError),
    /// Value cannot be written in the wire format.
    Encode(EncodeError),
    /// Error intentionally encoded by the other side in place of a value.
    Remote(RemoteError),
    /// Decode called without a target.
    NilTarget,
    /// Memory view outside of guest buffers.
    Bounds(BoundsError),
    /// Inbound buffer could not be allocated.
    Resize(ResizeError),
}

/// Error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Fatal to the current exchange.
    Transport,
    /// Application level failure carried as a value.
    Application,
    /// Programmer or resource error, fatal to the invocation.
    Contract,
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) | Self::Bounds(_) => ErrorKind::Transport,
            Self::Remote(_) => ErrorKind::Application,
            Self::Encode(_) | Self::NilTarget | Self::Resize(_) => ErrorKind::Contract,
        }
    }

    /// Returns the remote error, if this is one.
    pub const fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Remote(err) => Some(err),
            Self::NilTarget => None,
            Self::Bounds(err) => Some(err),
            Self::Resize(err) => Some(err),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "decode error: {err}"),
            Self::Encode(err) => write!(f, "encode error: {err}"),
            // message is forwarded verbatim, it may travel through several exchanges
            Self::Remote(err) => std::fmt::Display::fmt(err, f),
            Self::NilTarget => f.write_str("cannot decode into a nil root struct"),
            Self::Bounds(err) => write!(f, "invalid memory view: {err}"),
            Self::Resize(err) => write!(f, "resize failed: {err}"),
        }
    }
}

impl From<DecodeError> for Error {
    #[inline]
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<DecodingError> for Error {
    #[inline]
    fn from(err: DecodingError) -> Self {
        Self::Decode(err.into())
    }
}

impl From<EncodeError> for Error {
    #[inline]
    fn from(err: EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<EncodingError> for Error {
    #[inline]
    fn from(err: EncodingError) -> Self {
        Self::Encode(err.into())
    }
}

impl From<RemoteError> for Error {
    #[inline]
    fn from(err: RemoteError) -> Self {
        Self::Remote(err)
    }
}

impl From<BoundsError> for Error {
    #[inline]
    fn from(err: BoundsError) -> Self {
        Self::Bounds(err)
    }
}

impl From<ResizeError> for Error {
    #[inline]
    fn from(err: ResizeError) -> Self {
        Self::Resize(err)
    }
}

// ===== Remote Error =====

/// An application error encoded in place of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for RemoteError {}
impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
