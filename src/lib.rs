//! HTTP Signature Context
//!
//! The request/response context exchanged between a sandboxed guest and its host, its
//! positional binary encoding, and the memory bridge the context travels through.
#![warn(missing_debug_implementations)]

mod log;

pub mod codec;
pub mod schema;
pub mod context;
pub mod bridge;

pub mod error;
pub mod signature;

pub use schema::{Context, HeaderMap, Request, Response, StringList};
pub use error::{Error, ErrorKind, RemoteError};
pub use bridge::{Guest, Runtime};
