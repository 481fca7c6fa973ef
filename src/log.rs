#![allow(unused, reason = "logger")]
//! Exchange logging.
//!
//! Each macro takes the exchange side first, which becomes the log target, e.g:
//! `debug!(guest, "publish {len} bytes")` logs to `http_signature::guest`.

macro_rules! target {
    (guest) => { "http_signature::guest" };
    (host) => { "http_signature::host" };
}

macro_rules! trace {
    ($side:ident, $($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!(target: $crate::log::target!($side), $($tt)*);
    };
}

macro_rules! debug {
    ($side:ident, $($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::debug!(target: $crate::log::target!($side), $($tt)*);
    };
}

macro_rules! warning {
    ($side:ident, $($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::warn!(target: $crate::log::target!($side), $($tt)*);
    };
}

macro_rules! error {
    ($side:ident, $($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::error!(target: $crate::log::target!($side), $($tt)*);
    };
}

pub(crate) use {target, trace, debug, warning, error};
