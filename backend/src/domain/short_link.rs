//! Short-link data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::UserId;

/// Longest accepted short identifier.
pub const SHORT_ID_MAX: usize = 32;

/// Validation errors returned by the short-link constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortLinkValidationError {
    /// Short id was empty.
    EmptyShortId,
    /// Short id exceeded the accepted length.
    ShortIdTooLong { max: usize },
    /// Short id contained something other than ASCII letters and digits.
    InvalidShortIdCharacters,
    /// Long URL was blank once trimmed.
    EmptyLongUrl,
    /// Long URL did not parse as an absolute URL with a host.
    MalformedLongUrl,
    /// Long URL used a scheme other than `http` or `https`.
    UnsupportedScheme { scheme: String },
}

impl fmt::Display for ShortLinkValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyShortId => write!(f, "short id must not be empty"),
            Self::ShortIdTooLong { max } => write!(f, "short id must be at most {max} characters"),
            Self::InvalidShortIdCharacters => {
                write!(f, "short id may only contain ASCII letters and digits")
            }
            Self::EmptyLongUrl => write!(f, "long URL must not be empty"),
            Self::MalformedLongUrl => write!(f, "long URL must be an absolute URL"),
            Self::UnsupportedScheme { scheme } => {
                write!(f, "long URL scheme `{scheme}` is not supported; use http or https")
            }
        }
    }
}

impl std::error::Error for ShortLinkValidationError {}

/// Key under which a long URL is filed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortId(String);

impl ShortId {
    /// Validate and construct a [`ShortId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, ShortLinkValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, ShortLinkValidationError> {
        if id.is_empty() {
            return Err(ShortLinkValidationError::EmptyShortId);
        }
        if id.len() > SHORT_ID_MAX {
            return Err(ShortLinkValidationError::ShortIdTooLong { max: SHORT_ID_MAX });
        }
        if !id.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
            return Err(ShortLinkValidationError::InvalidShortIdCharacters);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ShortId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ShortId> for String {
    fn from(value: ShortId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ShortId {
    type Error = ShortLinkValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Redirect target: an absolute `http` or `https` URL.
///
/// The caller's text is stored as typed (minus surrounding whitespace) so the
/// redirect goes exactly where the owner asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct LongUrl(String);

impl LongUrl {
    /// Validate and construct a [`LongUrl`].
    ///
    /// # Examples
    /// ```
    /// use shortlink::domain::LongUrl;
    ///
    /// assert!(LongUrl::new("http://example.com").is_ok());
    /// assert!(LongUrl::new("javascript:alert(1)").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ShortLinkValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ShortLinkValidationError::EmptyLongUrl);
        }
        let parsed = Url::parse(trimmed).map_err(|_| ShortLinkValidationError::MalformedLongUrl)?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ShortLinkValidationError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ShortLinkValidationError::MalformedLongUrl);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for LongUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LongUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<LongUrl> for String {
    fn from(value: LongUrl) -> Self {
        value.0
    }
}

/// Directory entry: where a short id points and who may change it.
///
/// ## Invariants
/// - `owner_id` named an existing identity when the link was allocated.
/// - Only `long_url` changes after allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    long_url: LongUrl,
    owner_id: UserId,
}

impl ShortLink {
    /// Build a [`ShortLink`] from validated components.
    pub fn new(long_url: LongUrl, owner_id: UserId) -> Self {
        Self { long_url, owner_id }
    }

    /// Redirect target.
    pub fn long_url(&self) -> &LongUrl {
        &self.long_url
    }

    /// Identity permitted to change or delete this link.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Whether `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Replace the redirect target, keeping the owner.
    pub fn set_long_url(&mut self, long_url: LongUrl) {
        self.long_url = long_url;
    }
}
