//! Short-link directory use-cases and redirect resolution.
//!
//! The directory never resolves identity on its own; callers pass the
//! identity the session guard already resolved.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::identifier::{MAX_ALLOCATION_ATTEMPTS, SHORT_ID_LENGTH};
use crate::domain::ports::{IdGenerator, LinkStore, LinkStoreError};
use crate::domain::{
    Access, Error, Identity, LongUrl, Requested, ShortId, ShortLink, ShortLinkValidationError,
    UserId, classify,
};

/// Allocates, reads and mutates short links through the store port.
#[derive(Clone)]
pub struct LinkDirectory {
    store: Arc<dyn LinkStore>,
    ids: Arc<dyn IdGenerator>,
}

impl LinkDirectory {
    /// Build the directory from its driven ports.
    pub fn new(store: Arc<dyn LinkStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// File `long_url` under a fresh short id owned by `owner`.
    ///
    /// # Errors
    /// - [`crate::domain::ErrorCode::InvalidInput`] when the URL is not an
    ///   absolute `http`/`https` URL.
    /// - [`crate::domain::ErrorCode::InternalError`] when no unused id turned
    ///   up within the attempt budget.
    pub async fn allocate(&self, long_url: &str, owner: &Identity) -> Result<ShortId, Error> {
        let long_url = parse_long_url(long_url)?;
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let id = ShortId::new(self.ids.generate(SHORT_ID_LENGTH)).map_err(|err| {
                Error::internal(format!("generated short id is invalid: {err}"))
            })?;
            let link = ShortLink::new(long_url.clone(), owner.id().clone());
            match self.store.insert_if_absent(&id, link).await {
                Ok(()) => {
                    info!(short_id = %id, owner = %owner.id(), "short link allocated");
                    return Ok(id);
                }
                Err(LinkStoreError::IdTaken { .. }) => {
                    debug!(short_id = %id, attempt, "short id collision; drawing again");
                }
                Err(err) => return Err(Error::internal(err.to_string())),
            }
        }
        Err(Error::internal("could not allocate an unused short id"))
    }

    /// File `long_url` under a caller-chosen id, as the demo seed does.
    ///
    /// Returns `false` when the id is already in use; the existing entry is
    /// left untouched.
    ///
    /// # Errors
    /// [`crate::domain::ErrorCode::InvalidInput`] for a malformed id or URL.
    pub async fn insert_with_id(
        &self,
        short_id: &str,
        long_url: &str,
        owner: &UserId,
    ) -> Result<bool, Error> {
        let id = ShortId::new(short_id).map_err(|err| Error::invalid_input(err.to_string()))?;
        let link = ShortLink::new(parse_long_url(long_url)?, owner.clone());
        match self.store.insert_if_absent(&id, link).await {
            Ok(()) => Ok(true),
            Err(LinkStoreError::IdTaken { .. }) => Ok(false),
            Err(err) => Err(Error::internal(err.to_string())),
        }
    }

    /// Look a link up by its raw short id; invalid ids are simply absent.
    pub async fn get(&self, short_id: &str) -> Option<ShortLink> {
        let id = ShortId::new(short_id).ok()?;
        self.store.get(&id).await
    }

    /// Replace the long URL of a link owned by `requester`.
    ///
    /// Existence and ownership are checked before the new URL is validated,
    /// so a non-owner always sees `Forbidden`.
    ///
    /// # Errors
    /// `NotFound`, `Forbidden`, then `InvalidInput`, in that order.
    pub async fn update(
        &self,
        short_id: &str,
        new_long_url: &str,
        requester: &UserId,
    ) -> Result<(), Error> {
        let id = ShortId::new(short_id).map_err(|_| Error::short_link_missing())?;
        let link = self
            .store
            .get(&id)
            .await
            .ok_or_else(Error::short_link_missing)?;
        if !link.is_owned_by(requester) {
            return Err(Error::short_link_not_owned());
        }
        let long_url = parse_long_url(new_long_url)?;
        self.store
            .update_long_url(&id, requester, long_url)
            .await
            .map_err(map_store_error)?;
        info!(short_id = %id, "short link updated");
        Ok(())
    }

    /// Remove a link owned by `requester`.
    ///
    /// # Errors
    /// `NotFound` when absent, `Forbidden` when owned by someone else.
    pub async fn delete(&self, short_id: &str, requester: &UserId) -> Result<(), Error> {
        let id = ShortId::new(short_id).map_err(|_| Error::short_link_missing())?;
        self.store
            .remove(&id, requester)
            .await
            .map_err(map_store_error)?;
        info!(short_id = %id, "short link deleted");
        Ok(())
    }

    /// Every link owned by `owner`, keyed and ordered by short id.
    pub async fn list_by_owner(&self, owner: &UserId) -> BTreeMap<ShortId, ShortLink> {
        self.store.list_by_owner(owner).await.into_iter().collect()
    }

    /// The long URL a short id redirects to. Anyone may resolve.
    ///
    /// # Errors
    /// `NotFound` when the id is invalid or unallocated.
    pub async fn resolve_redirect(&self, short_id: &str) -> Result<LongUrl, Error> {
        self.get(short_id)
            .await
            .map(|link| link.long_url().clone())
            .ok_or_else(Error::short_link_missing)
    }

    /// Classify a request against the directory.
    ///
    /// The link is only looked up for a signed-in caller.
    pub async fn classify(&self, identity: Option<Identity>, requested: Option<&str>) -> Access {
        if identity.is_none() {
            return Access::Anonymous;
        }
        let requested = match requested {
            None => Requested::Nothing,
            Some(raw) => match ShortId::new(raw) {
                Ok(id) => match self.store.get(&id).await {
                    Some(link) => Requested::Found(id, link),
                    None => Requested::Missing,
                },
                Err(_) => Requested::Missing,
            },
        };
        classify(identity, requested)
    }
}

fn parse_long_url(raw: &str) -> Result<LongUrl, Error> {
    LongUrl::new(raw).map_err(|err| match err {
        ShortLinkValidationError::EmptyLongUrl => Error::invalid_input("Please enter a URL."),
        other => Error::invalid_input(format!("Please enter a valid web address: {other}.")),
    })
}

fn map_store_error(err: LinkStoreError) -> Error {
    match err {
        LinkStoreError::Missing { .. } => Error::short_link_missing(),
        LinkStoreError::NotOwner { .. } => Error::short_link_not_owned(),
        LinkStoreError::IdTaken { .. } => Error::internal(err.to_string()),
    }
}
