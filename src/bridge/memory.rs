//! Guest linear memory.
//!
//! Each guest instance owns its buffers explicitly, mapped into fixed segments of a 32-bit
//! guest address space:
//!
//! ```not_rust
//! 0x0000_0000 ..  0x0000_1000    unmapped
//! 0x0000_1000 ..  0x8000_0000    transmit, encoded by the guest, read by the host
//! 0x8000_0000 ..= 0xffff_ffff    inbound, written by the host, decoded by the guest
//! ```
//!
//! Raw `(address, length)` pairs crossing the boundary are validated against the buffer that
//! owns the address, and only the bytes currently in that buffer are addressable.
use super::error::{BoundsError, ResizeError};
use crate::codec::{self, Buffer};
use crate::log::debug;

/// Start address of the transmit buffer.
pub const TRANSMIT_BASE: u32 = 0x0000_1000;

/// Start address of the inbound buffer.
pub const INBOUND_BASE: u32 = 0x8000_0000;

const TRANSMIT_SPAN: usize = (INBOUND_BASE - TRANSMIT_BASE) as usize;
const INBOUND_SPAN: usize = (u32::MAX - INBOUND_BASE) as usize + 1;

/// Pack raw view into `(addr << 32) | len`.
#[inline]
pub const fn pack(addr: u32, len: u32) -> u64 {
    ((addr as u64) << 32) | len as u64
}

/// Unpack value returned by [`pack`] into `(addr, len)`.
#[inline]
pub const fn unpack(packed: u64) -> (u32, u32) {
    ((packed >> 32) as u32, packed as u32)
}

// ===== Limits =====

/// Guest memory limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Initial capacity of the transmit buffer.
    pub transmit_capacity: usize,
    /// Maximum size the inbound buffer may be resized to.
    pub max_inbound: usize,
}

impl Limits {
    pub const DEFAULT: Self = Self::new();

    /// Create default limits, 512 bytes transmit capacity and 16MiB inbound.
    #[inline]
    pub const fn new() -> Self {
        Self {
            transmit_capacity: 512,
            max_inbound: 16 * 1024 * 1024,
        }
    }
}

impl Default for Limits {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// ===== Exports =====

/// Guest memory operations exported to the host.
pub trait Exports {
    /// Validate a raw view into guest memory.
    fn view(&self, addr: u32, len: u32) -> Result<MemoryView<'_>, BoundsError>;

    /// Grow the inbound buffer to hold `size` bytes, returns the available size.
    fn resize(&mut self, size: u32) -> Result<u32, ResizeError>;

    /// Returns the address of the inbound buffer.
    fn inbound_addr(&self) -> u32;

    /// Copy `bytes` into guest memory at `addr`.
    fn write(&mut self, addr: u32, bytes: &[u8]) -> Result<(), BoundsError>;
}

// ===== GuestMemory =====

/// Transmit and inbound buffers of one guest instance.
#[derive(Debug)]
pub struct GuestMemory {
    transmit: Buffer,
    inbound: Vec<u8>,
    limits: Limits,
}

impl GuestMemory {
    /// Create new [`GuestMemory`] with default limits.
    #[inline]
    pub fn new() -> Self {
        Self::with_limits(Limits::new())
    }

    /// Create new [`GuestMemory`] with given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            transmit: Buffer::new(Vec::with_capacity(limits.transmit_capacity)),
            inbound: Vec::new(),
            limits,
        }
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the bytes written by the host in the current exchange.
    #[inline]
    pub fn inbound(&self) -> &[u8] {
        &self.inbound
    }

    /// Returns view of the last published bytes.
    #[inline]
    pub fn transmitted(&self) -> MemoryView<'_> {
        debug_assert!(self.transmit.get_ref().len() <= TRANSMIT_SPAN);
        MemoryView::new(TRANSMIT_BASE, self.transmit.get_ref())
    }

    /// Clear the transmit buffer for a new publish.
    #[inline]
    pub(crate) fn transmit_mut(&mut self) -> &mut Buffer {
        codec::clear(&mut self.transmit);
        &mut self.transmit
    }

    fn segment(&self, addr: u32) -> Option<(&[u8], u32)> {
        if addr >= INBOUND_BASE {
            Some((self.inbound.as_slice(), addr - INBOUND_BASE))
        } else if addr >= TRANSMIT_BASE {
            Some((self.transmit.get_ref().as_slice(), addr - TRANSMIT_BASE))
        } else {
            None
        }
    }
}

impl Default for GuestMemory {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Exports for GuestMemory {
    fn view(&self, addr: u32, len: u32) -> Result<MemoryView<'_>, BoundsError> {
        let bytes = self.segment(addr).and_then(|(segment, offset)| {
            let start = offset as usize;
            segment.get(start..start.checked_add(len as usize)?)
        });
        match bytes {
            Some(bytes) => Ok(MemoryView::new(addr, bytes)),
            None => Err(BoundsError::new(addr, len as usize)),
        }
    }

    fn resize(&mut self, size: u32) -> Result<u32, ResizeError> {
        let requested = size as usize;
        let max = self.limits.max_inbound.min(INBOUND_SPAN);
        if requested > max {
            return Err(ResizeError::Limit { requested, max });
        }

        // capacity only grows, the exposed length follows the request
        let additional = requested.saturating_sub(self.inbound.len());
        if self.inbound.try_reserve_exact(additional).is_err() {
            return Err(ResizeError::Alloc { requested });
        }
        self.inbound.resize(requested, 0);

        debug!(
            guest,
            "inbound resized to {requested} bytes, capacity {}",
            self.inbound.capacity()
        );
        Ok(size)
    }

    #[inline]
    fn inbound_addr(&self) -> u32 {
        INBOUND_BASE
    }

    fn write(&mut self, addr: u32, bytes: &[u8]) -> Result<(), BoundsError> {
        let target = addr.checked_sub(INBOUND_BASE).and_then(|offset| {
            let start = offset as usize;
            self.inbound.get_mut(start..start.checked_add(bytes.len())?)
        });
        match target {
            Some(target) => {
                target.copy_from_slice(bytes);
                Ok(())
            }
            None => Err(BoundsError::new(addr, bytes.len())),
        }
    }
}

// ===== MemoryView =====

/// Validated view into guest memory.
///
/// Borrows the memory it was validated against, so it cannot outlive a resize or a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryView<'a> {
    addr: u32,
    bytes: &'a [u8],
}

impl<'a> MemoryView<'a> {
    #[inline]
    const fn new(addr: u32, bytes: &'a [u8]) -> Self {
        Self { addr, bytes }
    }

    #[inline]
    pub const fn addr(&self) -> u32 {
        self.addr
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.bytes.len() as u32
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns raw `(addr, len)` pair.
    #[inline]
    pub const fn into_raw(self) -> (u32, u32) {
        (self.addr, self.len())
    }

    /// Returns `(addr << 32) | len`.
    #[inline]
    pub const fn pack(&self) -> u64 {
        pack(self.addr, self.len())
    }
}
