//! Domain primitives, services and ports.
//!
//! Purpose: define the typed records of the shortener, the error taxonomy,
//! identifier allocation, the session guard's request classification, and
//! the two services handlers talk to. Everything here is transport agnostic;
//! adapters live in `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload and its stable category.
//! - Identity, UserId, Email, PasswordDigest, Credentials: accounts.
//! - ShortId, LongUrl, ShortLink: directory entries.
//! - Access, Requested, Grant, classify: session guard outcomes.
//! - IdentityService, LinkDirectory: use-cases over the driven ports.

pub mod access;
pub mod auth;
pub mod demo_data;
pub mod error;
pub mod identifier;
pub mod identity_service;
pub mod link_directory;
pub mod ports;
pub mod short_link;
pub mod trace_id;
pub mod user;

pub use self::access::{Access, Grant, Requested, classify};
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::demo_data::{DemoSeedOutcome, seed_demo_data};
pub use self::error::{Error, ErrorCode};
pub use self::identifier::AlphanumericIdGenerator;
pub use self::identity_service::IdentityService;
pub use self::link_directory::LinkDirectory;
pub use self::short_link::{LongUrl, ShortId, ShortLink, ShortLinkValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, Identity, PasswordDigest, UserId, UserValidationError};

/// Convenient handler result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use shortlink::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::login_required())
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
