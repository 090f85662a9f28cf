//! Request classification for the session guard.
//!
//! Handlers resolve the caller first, look up the requested link (if any),
//! then ask [`classify`] what the caller may do. The outcome converts into
//! the matching domain [`Error`] when access is not granted.

use crate::domain::{Error, Identity, ShortId, ShortLink};

/// What the handler asked the directory for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requested {
    /// The route does not name a short link.
    Nothing,
    /// The route names a short link that is not in the directory.
    Missing,
    /// The route names a short link that exists.
    Found(ShortId, ShortLink),
}

/// Link access granted to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub identity: Identity,
    pub short_id: ShortId,
    pub link: ShortLink,
}

/// Guard outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No identity is attached to the request.
    Anonymous,
    /// Signed in; no resource was requested.
    Authenticated(Identity),
    /// Signed in; the requested link does not exist.
    ResourceNotFound(Identity),
    /// Signed in; the requested link belongs to someone else.
    ResourceForbidden(Identity),
    /// Signed in and owns the requested link.
    Authorized(Grant),
}

/// Classify a request from its resolved identity and requested link.
///
/// # Examples
/// ```
/// use shortlink::domain::{Access, Requested, classify};
///
/// assert_eq!(classify(None, Requested::Missing), Access::Anonymous);
/// ```
pub fn classify(identity: Option<Identity>, requested: Requested) -> Access {
    let Some(identity) = identity else {
        return Access::Anonymous;
    };
    match requested {
        Requested::Nothing => Access::Authenticated(identity),
        Requested::Missing => Access::ResourceNotFound(identity),
        Requested::Found(short_id, link) => {
            if link.is_owned_by(identity.id()) {
                Access::Authorized(Grant {
                    identity,
                    short_id,
                    link,
                })
            } else {
                Access::ResourceForbidden(identity)
            }
        }
    }
}

impl Access {
    /// The caller's identity, when signed in.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity)
            | Self::ResourceNotFound(identity)
            | Self::ResourceForbidden(identity) => Some(identity),
            Self::Authorized(grant) => Some(&grant.identity),
        }
    }

    /// Require a signed-in caller, ignoring any resource outcome.
    pub fn require_identity(self) -> Result<Identity, Error> {
        match self {
            Self::Anonymous => Err(Error::login_required()),
            Self::Authenticated(identity)
            | Self::ResourceNotFound(identity)
            | Self::ResourceForbidden(identity) => Ok(identity),
            Self::Authorized(grant) => Ok(grant.identity),
        }
    }

    /// Require that the caller owns the requested link.
    pub fn require_grant(self) -> Result<Grant, Error> {
        match self {
            Self::Anonymous => Err(Error::login_required()),
            Self::Authenticated(identity) | Self::ResourceNotFound(identity) => {
                Err(Error::short_link_missing().for_identity(&identity))
            }
            Self::ResourceForbidden(identity) => {
                Err(Error::short_link_not_owned().for_identity(&identity))
            }
            Self::Authorized(grant) => Ok(grant),
        }
    }
}
