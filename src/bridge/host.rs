use super::error::ResizeError;
use super::memory::{Exports, unpack};
use crate::codec::{self, Buffer};
use crate::error::Error;
use crate::log::{debug, error, trace, warning};
use crate::schema::{Context, decode_into, internal_encode, internal_error};

// ===== Next =====

/// Host function imported by the guest.
pub trait Next {
    /// Read the guest context at `addr`, process it, and write the result back into guest
    /// memory through `exports`.
    fn next(&mut self, exports: &mut dyn Exports, addr: u32, len: u32) -> Result<(), Error>;
}

// ===== Module =====

/// Guest instance as seen by the host.
pub trait Module: Exports {
    /// Run one invocation, returns the packed view of the published result.
    fn run(&mut self, next: &mut dyn Next) -> u64;
}

// ===== Handler =====

/// Host side context mutation.
pub trait Handler {
    fn call(&mut self, context: &mut Context) -> Result<(), Error>;
}

/// [`Handler`] that leaves the context as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Handler for Passthrough {
    #[inline]
    fn call(&mut self, _: &mut Context) -> Result<(), Error> {
        Ok(())
    }
}

/// Create [`Handler`] from a function.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&mut Context) -> Result<(), Error>,
{
    FromFn { f }
}

#[derive(Debug)]
pub struct FromFn<F> {
    f: F,
}

impl<F> Handler for FromFn<F>
where
    F: FnMut(&mut Context) -> Result<(), Error>,
{
    #[inline]
    fn call(&mut self, context: &mut Context) -> Result<(), Error> {
        (self.f)(context)
    }
}

// ===== Runtime =====

/// Host side of the exchange.
#[derive(Debug)]
pub struct Runtime<H = Passthrough> {
    context: Context,
    buffer: Buffer,
    handler: H,
    fatal: Option<Error>,
}

impl Runtime {
    /// Create new [`Runtime`] that does not mutate the context.
    #[inline]
    pub fn new() -> Self {
        Self::with_handler(Passthrough)
    }
}

impl Default for Runtime {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handler> Runtime<H> {
    /// Create new [`Runtime`] with given handler.
    pub fn with_handler(handler: H) -> Self {
        Self {
            context: Context::new(),
            buffer: Buffer::default(),
            handler,
            fatal: None,
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
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[inline]
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Decode `bytes` into the context.
    #[inline]
    pub fn read(&mut self, bytes: &[u8]) -> Result<(), Error> {
        decode_into(Some(&mut self.context), bytes)
    }

    /// Encode the context into the outgoing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if a context value is too long for the wire format.
    pub fn write(&mut self) -> Result<&[u8], Error> {
        codec::clear(&mut self.buffer);
        internal_encode(&self.context, &mut self.buffer)?;
        Ok(self.buffer.get_ref())
    }

    /// Encode an error sentinel into the outgoing buffer, in place of the context.
    pub fn write_error(&mut self, err: &Error) -> Result<&[u8], Error> {
        codec::clear(&mut self.buffer);
        internal_error(err, &mut self.buffer)?;
        Ok(self.buffer.get_ref())
    }

    /// Read the guest context at given raw view.
    pub fn receive(&mut self, exports: &dyn Exports, addr: u32, len: u32) -> Result<(), Error> {
        let view = exports.view(addr, len)?;
        trace!(host, "receive {} bytes at {addr:#010x}", view.len());
        self.read(view.as_bytes())
    }

    /// Copy the outgoing buffer into the guest inbound buffer.
    fn send(&mut self, exports: &mut dyn Exports) -> Result<(), Error> {
        let bytes = self.buffer.get_ref();
        let Ok(len) = u32::try_from(bytes.len()) else {
            return Err(ResizeError::Limit {
                requested: bytes.len(),
                max: u32::MAX as usize,
            }
            .into());
        };
        let size = exports.resize(len)?;
        debug_assert!(size >= len);
        let addr = exports.inbound_addr();
        exports.write(addr, bytes)?;
        debug!(host, "send {len} bytes at {addr:#010x}");
        Ok(())
    }

    /// Run one guest invocation with the context.
    ///
    /// On success, the context holds the guest result.
    ///
    /// # Errors
    ///
    /// Returns error if the guest failed, or any part of the exchange failed. An error
    /// published by the guest is returned as [`Error::Remote`].
    pub fn run<M: Module>(&mut self, module: &mut M) -> Result<(), Error> {
        self.fatal = None;
        self.write()?;
        self.send(module)?;

        let packed = module.run(self);
        if let Some(err) = self.fatal.take() {
            error!(host, "exchange aborted: {err}");
            return Err(err);
        }

        let (addr, len) = unpack(packed);
        self.receive(&*module, addr, len)
    }
}

impl<H: Handler> Next for Runtime<H> {
    fn next(&mut self, exports: &mut dyn Exports, addr: u32, len: u32) -> Result<(), Error> {
        if let Err(err) = self.receive(&*exports, addr, len) {
            warning!(host, "cannot read guest context: {err}");
            self.fatal = Some(err.clone());
            return Err(err);
        }

        let result = match self.handler.call(&mut self.context) {
            Ok(()) => self.write().map(|_| ()),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            // delivered to the guest as a value
            warning!(host, "handler failed: {err}");
            if let Err(err) = self.write_error(&err).map(|_| ()) {
                self.fatal = Some(err.clone());
                return Err(err);
            }
        }

        if let Err(err) = self.send(exports) {
            self.fatal = Some(err.clone());
            return Err(err);
        }
        Ok(())
    }
}
