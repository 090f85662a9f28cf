//! Shortlink library: a URL shortener with accounts and owner-checked links.
//!
//! The binary in `main.rs` wires these modules into an Actix server.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
pub(crate) mod test_support;

pub use middleware::Trace;
