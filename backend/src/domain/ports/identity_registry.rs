//! Driven port for identity storage.
//!
//! Adapters must make [`IdentityRegistry::insert_unique`] atomic: the
//! uniqueness checks and the write happen as one step so two concurrent
//! registrations with the same email cannot both succeed.

use async_trait::async_trait;

use crate::domain::{Email, Identity, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity registry adapters.
    pub enum IdentityRegistryError {
        /// Another identity already uses this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Another identity already uses this id.
        DuplicateId { id: String } => "identity id already taken: {id}",
    }
}

/// Port for storing and looking up identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRegistry: Send + Sync {
    /// Store `identity` unless its id or email is already present.
    async fn insert_unique(&self, identity: Identity) -> Result<(), IdentityRegistryError>;

    /// Fetch an identity by id.
    async fn find_by_id(&self, id: &UserId) -> Option<Identity>;

    /// Fetch an identity by email.
    async fn find_by_email(&self, email: &Email) -> Option<Identity>;
}
