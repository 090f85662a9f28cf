//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_hasher;
mod id_generator;
mod identity_registry;
mod link_store;

#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use id_generator::MockIdGenerator;
pub use id_generator::IdGenerator;
#[cfg(test)]
pub use identity_registry::MockIdentityRegistry;
pub use identity_registry::{IdentityRegistry, IdentityRegistryError};
#[cfg(test)]
pub use link_store::MockLinkStore;
pub use link_store::{LinkStore, LinkStoreError};
