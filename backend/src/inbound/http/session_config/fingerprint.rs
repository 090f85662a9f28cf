//! Session key fingerprinting.
//!
//! Startup logs carry a truncated SHA-256 of the signing key so operators can
//! tell which key a process runs with without seeing the key itself.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Hex fingerprint of the key's signing half.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use shortlink::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    let prefix: Vec<u8> = digest.iter().copied().take(FINGERPRINT_BYTES).collect();
    hex::encode(prefix)
}
