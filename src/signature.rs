//! Signature identity.
//!
//! Guest and host identify the schema revision they were built against by name and version.
//! Mismatches are not negotiated here, the runtime driving the guest decides what to do.

/// Signature name.
pub const NAME: &str = "http";

/// Signature version.
pub const VERSION: &str = "v0.1.1";

/// Returns `name@version`, e.g: `"http@v0.1.1"`.
pub fn id() -> String {
    format!("{NAME}@{VERSION}")
}
