//! Driven port for one-way credential hashing.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hasher adapters.
    pub enum CredentialHashError {
        /// The hashing primitive failed to produce a digest.
        Hash { message: String } => "credential hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message: String } => "stored credential digest is malformed: {message}",
    }
}

/// Salted one-way hashing of raw passwords.
///
/// Implementations must verify in constant time with respect to the digest.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `raw` with a fresh salt.
    fn hash(&self, raw: &str) -> Result<PasswordDigest, CredentialHashError>;

    /// Whether `raw` matches `digest`.
    fn verify(&self, raw: &str, digest: &PasswordDigest) -> Result<bool, CredentialHashError>;
}
