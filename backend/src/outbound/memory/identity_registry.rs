//! `IdentityRegistry` backed by a locked hash map.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{IdentityRegistry, IdentityRegistryError};
use crate::domain::{Email, Identity, UserId};

/// Process-local identity registry.
///
/// Uniqueness checks and the insert share one write guard, giving
/// compare-and-insert semantics across worker threads.
#[derive(Debug, Default)]
pub struct InMemoryIdentityRegistry {
    identities: RwLock<HashMap<UserId, Identity>>,
}

impl InMemoryIdentityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.identities.read().len()
    }

    /// Whether the registry holds no identities.
    pub fn is_empty(&self) -> bool {
        self.identities.read().is_empty()
    }
}

#[async_trait]
impl IdentityRegistry for InMemoryIdentityRegistry {
    async fn insert_unique(&self, identity: Identity) -> Result<(), IdentityRegistryError> {
        let mut identities = self.identities.write();
        if identities.contains_key(identity.id()) {
            return Err(IdentityRegistryError::duplicate_id(identity.id().as_ref()));
        }
        if identities
            .values()
            .any(|existing| existing.email() == identity.email())
        {
            return Err(IdentityRegistryError::duplicate_email(
                identity.email().as_ref(),
            ));
        }
        identities.insert(identity.id().clone(), identity);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Option<Identity> {
        self.identities.read().get(id).cloned()
    }

    async fn find_by_email(&self, email: &Email) -> Option<Identity> {
        self.identities
            .read()
            .values()
            .find(|identity| identity.email() == email)
            .cloned()
    }
}
