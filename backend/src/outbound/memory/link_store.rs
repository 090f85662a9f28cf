//! `LinkStore` backed by a locked ordered map.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{LinkStore, LinkStoreError};
use crate::domain::{LongUrl, ShortId, ShortLink, UserId};

/// Process-local short-link directory storage.
///
/// Keys are kept ordered so owner listings come back sorted by short id.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: RwLock<BTreeMap<ShortId, ShortLink>>,
}

impl InMemoryLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    /// Whether the store holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }
}

fn owned_entry<'a>(
    links: &'a mut BTreeMap<ShortId, ShortLink>,
    id: &ShortId,
    requester: &UserId,
) -> Result<&'a mut ShortLink, LinkStoreError> {
    let link = links
        .get_mut(id)
        .ok_or_else(|| LinkStoreError::missing(id.as_ref()))?;
    if !link.is_owned_by(requester) {
        return Err(LinkStoreError::not_owner(id.as_ref()));
    }
    Ok(link)
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert_if_absent(&self, id: &ShortId, link: ShortLink) -> Result<(), LinkStoreError> {
        match self.links.write().entry(id.clone()) {
            Entry::Occupied(_) => Err(LinkStoreError::id_taken(id.as_ref())),
            Entry::Vacant(slot) => {
                slot.insert(link);
                Ok(())
            }
        }
    }

    async fn get(&self, id: &ShortId) -> Option<ShortLink> {
        self.links.read().get(id).cloned()
    }

    async fn update_long_url(
        &self,
        id: &ShortId,
        requester: &UserId,
        long_url: LongUrl,
    ) -> Result<(), LinkStoreError> {
        let mut links = self.links.write();
        owned_entry(&mut links, id, requester)?.set_long_url(long_url);
        Ok(())
    }

    async fn remove(&self, id: &ShortId, requester: &UserId) -> Result<ShortLink, LinkStoreError> {
        let mut links = self.links.write();
        owned_entry(&mut links, id, requester)?;
        links
            .remove(id)
            .ok_or_else(|| LinkStoreError::missing(id.as_ref()))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Vec<(ShortId, ShortLink)> {
        self.links
            .read()
            .iter()
            .filter(|(_, link)| link.is_owned_by(owner))
            .map(|(id, link)| (id.clone(), link.clone()))
            .collect()
    }
}
