//! Identity & session guard use-cases: register, authenticate, resolve.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::identifier::{MAX_ALLOCATION_ATTEMPTS, USER_ID_LENGTH};
use crate::domain::ports::{
    CredentialHashError, CredentialHasher, IdGenerator, IdentityRegistry, IdentityRegistryError,
};
use crate::domain::{Credentials, CredentialsValidationError, Email, Error, Identity, UserId};

/// Registers and authenticates identities against the registry port.
#[derive(Clone)]
pub struct IdentityService {
    registry: Arc<dyn IdentityRegistry>,
    hasher: Arc<dyn CredentialHasher>,
    ids: Arc<dyn IdGenerator>,
}

impl IdentityService {
    /// Build the service from its driven ports.
    pub fn new(
        registry: Arc<dyn IdentityRegistry>,
        hasher: Arc<dyn CredentialHasher>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            registry,
            hasher,
            ids,
        }
    }

    /// Create a new identity with a freshly generated id.
    ///
    /// # Errors
    /// - [`crate::domain::ErrorCode::InvalidInput`] when email or password is empty.
    /// - [`crate::domain::ErrorCode::DuplicateEmail`] when the email is taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<Identity, Error> {
        let credentials = parse_credentials(email, password)?;
        if self.registry.find_by_email(credentials.email()).await.is_some() {
            return Err(duplicate_email(credentials.email()));
        }
        let digest = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hash_error)?;

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let id = self.next_id()?;
            let identity = Identity::new(id, credentials.email().clone(), digest.clone());
            match self.registry.insert_unique(identity.clone()).await {
                Ok(()) => {
                    info!(user_id = %identity.id(), "identity registered");
                    return Ok(identity);
                }
                Err(IdentityRegistryError::DuplicateId { id }) => {
                    debug!(%id, attempt, "identity id collision; drawing again");
                }
                Err(IdentityRegistryError::DuplicateEmail { .. }) => {
                    return Err(duplicate_email(credentials.email()));
                }
            }
        }

        Err(Error::internal("could not allocate an unused identity id"))
    }

    /// Create an identity under a caller-chosen id, as the demo seed does.
    ///
    /// # Errors
    /// As [`IdentityService::register`], plus [`crate::domain::ErrorCode::InternalError`]
    /// when the id is already in use.
    pub async fn register_with_id(
        &self,
        id: UserId,
        email: &str,
        password: &str,
    ) -> Result<Identity, Error> {
        let credentials = parse_credentials(email, password)?;
        let digest = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hash_error)?;
        let identity = Identity::new(id, credentials.email().clone(), digest);
        match self.registry.insert_unique(identity.clone()).await {
            Ok(()) => Ok(identity),
            Err(IdentityRegistryError::DuplicateEmail { .. }) => {
                Err(duplicate_email(credentials.email()))
            }
            Err(err @ IdentityRegistryError::DuplicateId { .. }) => {
                Err(Error::internal(err.to_string()))
            }
        }
    }

    /// Check an email/password pair against the registry.
    ///
    /// Blank fields are not rejected up front: an email that is empty once
    /// trimmed matches no identity, and an empty password fails verification.
    ///
    /// # Errors
    /// - [`crate::domain::ErrorCode::UnknownEmail`] when no identity has the email.
    /// - [`crate::domain::ErrorCode::CredentialMismatch`] when the password does not verify.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, Error> {
        let identity = match Email::new(email) {
            Ok(email) => self.registry.find_by_email(&email).await,
            Err(_) => None,
        };
        let Some(identity) = identity else {
            return Err(Error::unknown_email(
                "No account is registered with that email.",
            ));
        };
        let verified = self
            .hasher
            .verify(password, identity.credential())
            .map_err(map_hash_error)?;
        if !verified {
            warn!(user_id = %identity.id(), "password mismatch on login");
            return Err(Error::credential_mismatch(
                "The password does not match our records.",
            ));
        }
        Ok(identity)
    }

    /// Map the id carried by a session to a known identity.
    pub async fn resolve_identity(&self, session_user: Option<&UserId>) -> Option<Identity> {
        let id = session_user?;
        let identity = self.registry.find_by_id(id).await;
        if identity.is_none() {
            debug!(user_id = %id, "session names an unknown identity");
        }
        identity
    }

    /// Look up an identity by id.
    pub async fn find(&self, id: &UserId) -> Option<Identity> {
        self.registry.find_by_id(id).await
    }

    fn next_id(&self) -> Result<UserId, Error> {
        UserId::new(self.ids.generate(USER_ID_LENGTH))
            .map_err(|err| Error::internal(format!("generated identity id is invalid: {err}")))
    }
}

fn parse_credentials(email: &str, password: &str) -> Result<Credentials, Error> {
    Credentials::try_from_parts(email, password).map_err(|err| match err {
        CredentialsValidationError::EmptyEmail | CredentialsValidationError::EmptyPassword => {
            Error::invalid_input("Email and password must not be empty.")
        }
        CredentialsValidationError::EmailTooLong { .. } => Error::invalid_input(err.to_string()),
    })
}

fn duplicate_email(email: &Email) -> Error {
    Error::duplicate_email(format!("An account already exists for {email}."))
}

fn map_hash_error(err: CredentialHashError) -> Error {
    Error::internal(err.to_string())
}
