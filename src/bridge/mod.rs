//! Guest/Host Bridge.
//!
//! One exchange moves the context from a guest into the host and back:
//!
//! 1. the guest encodes its context into its transmit buffer, and calls the host [`Next`] with
//!    the raw `(address, length)`,
//! 2. the host validates the view, decodes it, and runs its [`Handler`] on the context,
//! 3. the host encodes the result, or an error sentinel if the handler failed, asks the guest
//!    to [`resize`] its inbound buffer, and writes the bytes into it,
//! 4. the guest decodes its inbound buffer into its context.
//!
//! A full invocation is driven by [`Runtime::run`], which publishes the host context into a
//! guest [`Module`] and decodes what the module publishes back.
//!
//! [`resize`]: Exports::resize
mod error;
mod memory;
mod guest;
mod host;

pub use error::{BoundsError, ResizeError};
pub use memory::{
    Exports, GuestMemory, INBOUND_BASE, Limits, MemoryView, TRANSMIT_BASE, pack, unpack,
};
pub use guest::{Function, Guest, Invocation};
pub use host::{FromFn, Handler, Module, Next, Passthrough, Runtime, from_fn};
