//! Identity data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest accepted user identifier.
pub const USER_ID_MAX: usize = 32;
/// Longest accepted email address, per RFC 5321.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by the identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// User id was empty.
    EmptyId,
    /// User id exceeded the accepted length.
    IdTooLong { max: usize },
    /// User id contained something other than ASCII letters and digits.
    InvalidIdCharacters,
    /// Email was blank once trimmed.
    EmptyEmail,
    /// Email exceeded the accepted length.
    EmailTooLong { max: usize },
    /// Credential digest was empty.
    EmptyDigest,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::IdTooLong { max } => write!(f, "user id must be at most {max} characters"),
            Self::InvalidIdCharacters => {
                write!(f, "user id may only contain ASCII letters and digits")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyDigest => write!(f, "credential digest must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable identity identifier made of ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.len() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        if !id.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
            return Err(UserValidationError::InvalidIdCharacters);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Email address used as the login name.
///
/// Surrounding whitespace is trimmed; comparison is otherwise exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One-way credential digest in PHC string format.
///
/// The digest never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by a credential hasher.
    pub fn new(digest: impl Into<String>) -> Result<Self, UserValidationError> {
        let digest = digest.into();
        if digest.is_empty() {
            return Err(UserValidationError::EmptyDigest);
        }
        Ok(Self(digest))
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Registered account.
///
/// ## Invariants
/// - `id` is unique across the registry.
/// - `email` is unique across the registry.
/// - Identities are never edited once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: UserId,
    email: Email,
    credential: PasswordDigest,
}

impl Identity {
    /// Build an [`Identity`] from validated components.
    pub fn new(id: UserId, email: Email, credential: PasswordDigest) -> Self {
        Self {
            id,
            email,
            credential,
        }
    }

    /// Stable identifier, also stored in the session cookie.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored credential digest.
    pub fn credential(&self) -> &PasswordDigest {
        &self.credential
    }
}
