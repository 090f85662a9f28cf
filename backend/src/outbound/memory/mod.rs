//! In-memory adapters. State lives for the life of the process.

mod identity_registry;
mod link_store;

pub use identity_registry::InMemoryIdentityRegistry;
pub use link_store::InMemoryLinkStore;
