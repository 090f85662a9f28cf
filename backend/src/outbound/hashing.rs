//! Argon2id adapter for the credential hasher port.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordDigest;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Salted Argon2id hashing producing PHC strings.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    /// Hasher with the crate's recommended Argon2id parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hasher with explicit memory (KiB), iteration and lane costs.
    ///
    /// Low costs are only suitable for tests.
    ///
    /// # Errors
    /// Returns [`CredentialHashError::Hash`] when the parameters are out of range.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        lanes: u32,
    ) -> Result<Self, CredentialHashError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|err| CredentialHashError::hash(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Argon2CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2CredentialHasher").finish_non_exhaustive()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, raw: &str) -> Result<PasswordDigest, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|err| CredentialHashError::hash(err.to_string()))?
            .to_string();
        PasswordDigest::new(phc).map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    fn verify(&self, raw: &str, digest: &PasswordDigest) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(digest.as_ref())
            .map_err(|err| CredentialHashError::malformed_digest(err.to_string()))?;
        match self.argon2.verify_password(raw.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::malformed_digest(err.to_string())),
        }
    }
}
