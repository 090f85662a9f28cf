//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local identity registry and link store
//! - **hashing**: Argon2id credential hashing
//!
//! Adapters translate between domain types and their backing structures and
//! hold no business rules beyond the atomicity their ports demand.

pub mod hashing;
pub mod memory;
