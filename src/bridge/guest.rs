use super::error::{BoundsError, ResizeError};
use super::host::{Module, Next};
use super::memory::{Exports, GuestMemory, Limits, MemoryView};
use crate::error::Error;
use crate::log::{debug, error, trace, warning};
use crate::schema::{Context, decode_into, internal_encode, internal_error};
use crate::signature;

/// Guest side of the exchange.
///
/// Owns the guest context and the memory it is exchanged through.
#[derive(Debug, Default)]
pub struct Guest {
    context: Context,
    memory: GuestMemory,
}

impl Guest {
    /// Create new [`Guest`] with default limits.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new [`Guest`] with given limits.
    #[inline]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            context: Context::new(),
            memory: GuestMemory::with_limits(limits),
        }
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    #[inline]
    pub fn memory(&self) -> &GuestMemory {
        &self.memory
    }

    /// Returns signature name the guest was built against.
    #[inline]
    pub const fn name(&self) -> &'static str {
        signature::NAME
    }

    /// Returns signature version the guest was built against.
    #[inline]
    pub const fn version(&self) -> &'static str {
        signature::VERSION
    }

    /// Encode the context into a fresh transmit buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if a context value is too long for the wire format.
    pub fn publish(&mut self) -> Result<MemoryView<'_>, Error> {
        internal_encode(&self.context, self.memory.transmit_mut())?;
        let view = self.memory.transmitted();
        debug!(guest, "publish {} bytes at {:#010x}", view.len(), view.addr());
        Ok(view)
    }

    /// Encode an error sentinel into a fresh transmit buffer, in place of the context.
    pub fn publish_error(&mut self, err: &Error) -> Result<MemoryView<'_>, Error> {
        internal_error(err, self.memory.transmit_mut())?;
        Ok(self.memory.transmitted())
    }

    /// Grow the inbound buffer, see [`Exports::resize`].
    #[inline]
    pub fn resize(&mut self, size: u32) -> Result<u32, ResizeError> {
        self.memory.resize(size)
    }

    /// Decode the inbound buffer into the context.
    pub fn receive(&mut self) -> Result<(), Error> {
        trace!(guest, "receive {} bytes", self.memory.inbound().len());
        decode_into(Some(&mut self.context), self.memory.inbound())
    }

    /// Hand the context to the host, and returns it with the host mutations.
    ///
    /// # Errors
    ///
    /// Returns error if the host failed, or the host reply cannot be decoded. An error sent by
    /// the host in place of the context is returned as [`Error::Remote`].
    pub fn next(&mut self, host: &mut dyn Next) -> Result<&mut Context, Error> {
        let (addr, len) = self.publish()?.into_raw();
        host.next(&mut self.memory, addr, len)?;
        self.receive()?;
        Ok(&mut self.context)
    }

    /// Run one invocation.
    ///
    /// Decode the inbound context, call `f`, and publish the result. If any of them fails, an
    /// error sentinel is published instead. Returns the packed view of the published bytes.
    ///
    /// If the sentinel cannot be published either, returns an empty view.
    pub fn run<F>(&mut self, host: &mut dyn Next, f: F) -> u64
    where
        F: FnOnce(&mut Invocation<'_>) -> Result<(), Error>,
    {
        let result = match self.receive() {
            Ok(()) => f(&mut Invocation {
                guest: &mut *self,
                host,
            }),
            Err(err) => Err(err),
        };

        let result = match result {
            Ok(()) => self.publish().map(|view| view.pack()),
            Err(err) => Err(err),
        };
        let err = match result {
            Ok(packed) => return packed,
            Err(err) => err,
        };

        warning!(guest, "invocation failed: {err}");
        match self.publish_error(&err).map(|view| view.pack()) {
            Ok(packed) => packed,
            Err(_err) => {
                error!(guest, "cannot publish error: {_err}");
                self.memory.transmit_mut();
                self.memory.transmitted().pack()
            }
        }
    }
}

impl Exports for Guest {
    #[inline]
    fn view(&self, addr: u32, len: u32) -> Result<MemoryView<'_>, BoundsError> {
        self.memory.view(addr, len)
    }

    #[inline]
    fn resize(&mut self, size: u32) -> Result<u32, ResizeError> {
        self.memory.resize(size)
    }

    #[inline]
    fn inbound_addr(&self) -> u32 {
        self.memory.inbound_addr()
    }

    #[inline]
    fn write(&mut self, addr: u32, bytes: &[u8]) -> Result<(), BoundsError> {
        self.memory.write(addr, bytes)
    }
}

// ===== Invocation =====

/// Guest context during a [`Guest::run`] call.
pub struct Invocation<'a> {
    guest: &'a mut Guest,
    host: &'a mut dyn Next,
}

impl Invocation<'_> {
    #[inline]
    pub fn context(&self) -> &Context {
        &self.guest.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.guest.context
    }

    /// Call the host, see [`Guest::next`].
    #[inline]
    pub fn next(&mut self) -> Result<&mut Context, Error> {
        self.guest.next(&mut *self.host)
    }
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("guest", &self.guest)
            .finish_non_exhaustive()
    }
}

// ===== Function =====

/// Guest [`Module`] from a function.
pub struct Function<F> {
    guest: Guest,
    function: F,
}

impl<F> Function<F>
where
    F: FnMut(&mut Invocation<'_>) -> Result<(), Error>,
{
    /// Create new [`Function`] with default limits.
    #[inline]
    pub fn new(function: F) -> Self {
        Self::with_limits(Limits::new(), function)
    }

    /// Create new [`Function`] with given limits.
    #[inline]
    pub fn with_limits(limits: Limits, function: F) -> Self {
        Self {
            guest: Guest::with_limits(limits),
            function,
        }
    }
}

impl<F> Function<F> {
    #[inline]
    pub fn guest(&self) -> &Guest {
        &self.guest
    }

    #[inline]
    pub fn guest_mut(&mut self) -> &mut Guest {
        &mut self.guest
    }
}

impl<F> Exports for Function<F> {
    #[inline]
    fn view(&self, addr: u32, len: u32) -> Result<MemoryView<'_>, BoundsError> {
        self.guest.view(addr, len)
    }

    #[inline]
    fn resize(&mut self, size: u32) -> Result<u32, ResizeError> {
        self.guest.resize(size)
    }

    #[inline]
    fn inbound_addr(&self) -> u32 {
        self.guest.inbound_addr()
    }

    #[inline]
    fn write(&mut self, addr: u32, bytes: &[u8]) -> Result<(), BoundsError> {
        self.guest.write(addr, bytes)
    }
}

impl<F> Module for Function<F>
where
    F: FnMut(&mut Invocation<'_>) -> Result<(), Error>,
{
    fn run(&mut self, next: &mut dyn Next) -> u64 {
        self.guest.run(next, &mut self.function)
    }
}

impl<F> std::fmt::Debug for Function<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("guest", &self.guest)
            .finish_non_exhaustive()
    }
}
