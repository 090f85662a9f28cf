//! Test utilities for unit tests in `src/`.
//!
//! Only compiled for tests. Integration tests under `tests/` use the real
//! adapters with cheap Argon2 parameters instead.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::ports::{CredentialHashError, CredentialHasher, IdGenerator};
use crate::domain::{IdentityService, LinkDirectory, PasswordDigest};
use crate::outbound::memory::{InMemoryIdentityRegistry, InMemoryLinkStore};

/// Reversible "hasher" so unit tests avoid Argon2's cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextHasher;

impl CredentialHasher for PlainTextHasher {
    fn hash(&self, raw: &str) -> Result<PasswordDigest, CredentialHashError> {
        PasswordDigest::new(format!("plain${raw}"))
            .map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    fn verify(&self, raw: &str, digest: &PasswordDigest) -> Result<bool, CredentialHashError> {
        digest
            .as_ref()
            .strip_prefix("plain$")
            .map(|stored| stored == raw)
            .ok_or_else(|| CredentialHashError::malformed_digest("missing plain$ prefix"))
    }
}

/// Generator replaying a fixed script of ids, then falling back to a counter.
#[derive(Debug, Default)]
pub struct ScriptedIds {
    script: Mutex<VecDeque<String>>,
    counter: Mutex<usize>,
}

impl ScriptedIds {
    /// Replay `ids` in order before counting.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(ids.into_iter().map(Into::into).collect()),
            counter: Mutex::new(0),
        }
    }
}

impl IdGenerator for ScriptedIds {
    fn generate(&self, length: usize) -> String {
        if let Some(id) = self.script.lock().pop_front() {
            return id;
        }
        let mut counter = self.counter.lock();
        *counter += 1;
        format!("{:0>width$}", *counter, width = length)
    }
}

/// Services over fresh in-memory adapters.
pub struct Harness {
    pub identities: IdentityService,
    pub links: LinkDirectory,
    pub registry: Arc<InMemoryIdentityRegistry>,
    pub store: Arc<InMemoryLinkStore>,
}

/// Build a [`Harness`] whose ids come from `ids`.
pub fn harness_with_ids(ids: Arc<dyn IdGenerator>) -> Harness {
    let registry = Arc::new(InMemoryIdentityRegistry::new());
    let store = Arc::new(InMemoryLinkStore::new());
    Harness {
        identities: IdentityService::new(registry.clone(), Arc::new(PlainTextHasher), ids.clone()),
        links: LinkDirectory::new(store.clone(), ids),
        registry,
        store,
    }
}

/// Build a [`Harness`] with counter-based ids.
pub fn harness() -> Harness {
    harness_with_ids(Arc::new(ScriptedIds::default()))
}
