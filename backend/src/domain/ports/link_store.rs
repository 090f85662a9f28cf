//! Driven port for short-link storage.
//!
//! Owner checks live inside the adapter so that "check owner, then write"
//! happens under a single lock.

use async_trait::async_trait;

use crate::domain::{LongUrl, ShortId, ShortLink, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by link store adapters.
    pub enum LinkStoreError {
        /// An entry with this id already exists.
        IdTaken { id: String } => "short id already taken: {id}",
        /// No entry with this id exists.
        Missing { id: String } => "short id not found: {id}",
        /// The requester does not own the entry.
        NotOwner { id: String } => "short id {id} is owned by another identity",
    }
}

/// Port for reading and mutating the short-link directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Store `link` under `id` unless the id is already in use.
    async fn insert_if_absent(&self, id: &ShortId, link: ShortLink) -> Result<(), LinkStoreError>;

    /// Fetch the entry for `id`.
    async fn get(&self, id: &ShortId) -> Option<ShortLink>;

    /// Replace the long URL of an entry owned by `requester`.
    async fn update_long_url(
        &self,
        id: &ShortId,
        requester: &UserId,
        long_url: LongUrl,
    ) -> Result<(), LinkStoreError>;

    /// Remove an entry owned by `requester`.
    async fn remove(&self, id: &ShortId, requester: &UserId) -> Result<ShortLink, LinkStoreError>;

    /// Every entry owned by `owner`, ordered by id.
    async fn list_by_owner(&self, owner: &UserId) -> Vec<(ShortId, ShortLink)>;
}
