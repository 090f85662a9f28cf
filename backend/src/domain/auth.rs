//! Registration credentials.
//!
//! Keep form parsing outside the domain by exposing a constructor that
//! validates raw strings before a handler talks to the identity service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{Email, UserValidationError};

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email exceeded the accepted length.
    EmailTooLong { max: usize },
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated email/password pair.
///
/// ## Invariants
/// - `email` satisfies [`Email`] validation.
/// - `password` is non-empty but keeps caller-provided whitespace so
///   credential comparisons are never surprising.
/// - The password buffer is zeroed on drop.
///
/// # Examples
/// ```
/// use shortlink::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("a@a.com", "123").unwrap();
/// assert_eq!(creds.email().as_ref(), "a@a.com");
/// assert_eq!(creds.password(), "123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(|err| match err {
            UserValidationError::EmailTooLong { max } => {
                CredentialsValidationError::EmailTooLong { max }
            }
            _ => CredentialsValidationError::EmptyEmail,
        })?;

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for registry lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Raw password as typed by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"..")
            .finish()
    }
}
