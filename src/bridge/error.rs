//! Guest memory errors.

/// A raw view that does not lie inside a guest buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundsError {
    addr: u32,
    len: usize,
}

impl BoundsError {
    pub(crate) const fn new(addr: u32, len: usize) -> Self {
        Self { addr, len }
    }

    /// Returns the rejected address.
    #[inline]
    pub const fn addr(&self) -> u32 {
        self.addr
    }

    /// Returns the rejected length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }
}

impl std::error::Error for BoundsError { }
impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bytes at {:#010x} is outside guest memory", self.len, self.addr)
    }
}

// ===== Resize Error =====

/// An error that can occur when growing the guest inbound buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResizeError {
    /// Requested size is beyond configured limit.
    Limit {
        requested: usize,
        max: usize,
    },
    /// Allocator failed to reserve the requested size.
    Alloc {
        requested: usize,
    },
}

impl ResizeError {
    /// Returns the requested size.
    #[inline]
    pub const fn requested(&self) -> usize {
        match self {
            Self::Limit { requested, .. } | Self::Alloc { requested } => *requested,
        }
    }
}

impl std::error::Error for ResizeError { }
impl std::fmt::Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit { requested, max } => {
                write!(f, "requested {requested} bytes, limit is {max} bytes")
            }
            Self::Alloc { requested } => write!(f, "cannot allocate {requested} bytes"),
        }
    }
}
