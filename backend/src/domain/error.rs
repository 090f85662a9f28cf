//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] to a status code and renders the error view with the
//! [`Error::title`] and [`Error::detail`] pair.

use std::fmt;

use crate::domain::{Identity, TraceId};

/// Stable machine-readable error code describing the failure category.
///
/// Every variant is an expected, user-facing outcome except
/// [`ErrorCode::InternalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A required field was empty or a value failed validation.
    InvalidInput,
    /// Registration used an email that already belongs to an identity.
    DuplicateEmail,
    /// Login used an email that no identity has.
    UnknownEmail,
    /// Login password did not verify against the stored digest.
    CredentialMismatch,
    /// The short identifier is not in the directory.
    NotFound,
    /// The caller does not own the requested short link.
    Forbidden,
    /// The request requires a signed-in identity.
    Unauthenticated,
    /// An unexpected failure inside the service.
    InternalError,
}

impl ErrorCode {
    /// Stable snake_case label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::DuplicateEmail => "duplicate_email",
            Self::UnknownEmail => "unknown_email",
            Self::CredentialMismatch => "credential_mismatch",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Unauthenticated => "unauthenticated",
            Self::InternalError => "internal_error",
        }
    }

    /// Heading shown above the detail message on the error view.
    pub fn title(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid Input",
            Self::DuplicateEmail => "Registration Failed",
            Self::UnknownEmail | Self::CredentialMismatch => "Login Failed",
            Self::NotFound => "Invalid Short URL",
            Self::Forbidden | Self::Unauthenticated => "Permission Denied",
            Self::InternalError => "Something Went Wrong",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `detail` is never empty; blank messages fall back to the code's title.
///
/// # Examples
/// ```
/// use shortlink::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Please double check the short URL exists.");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.title(), "Invalid Short URL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    detail: String,
    trace_id: Option<String>,
    user_email: Option<String>,
}

impl Error {
    /// Create a new error, capturing the in-scope trace identifier if any.
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let detail = if detail.trim().is_empty() {
            code.title().to_owned()
        } else {
            detail
        };
        Self {
            code,
            detail,
            trace_id: TraceId::current().map(|id| id.to_string()),
            user_email: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Heading for the error view.
    pub fn title(&self) -> &'static str {
        self.code.title()
    }

    /// Human-readable detail message.
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }

    /// Correlation identifier captured when the error was built.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Email of the signed-in caller the error was raised for, if known.
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// Record the signed-in caller so the error view keeps their header.
    #[must_use]
    pub fn for_identity(mut self, identity: &Identity) -> Self {
        self.user_email = Some(identity.email().to_string());
        self
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidInput`].
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, detail)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateEmail`].
    pub fn duplicate_email(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEmail, detail)
    }

    /// Convenience constructor for [`ErrorCode::UnknownEmail`].
    pub fn unknown_email(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownEmail, detail)
    }

    /// Convenience constructor for [`ErrorCode::CredentialMismatch`].
    pub fn credential_mismatch(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::CredentialMismatch, detail)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, detail)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, detail)
    }

    /// Convenience constructor for [`ErrorCode::Unauthenticated`].
    pub fn unauthenticated(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated, detail)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, detail)
    }

    /// The canonical "log in first" error.
    pub fn login_required() -> Self {
        Self::unauthenticated("Please log in to access this content.")
    }

    /// The canonical "no such short link" error.
    pub fn short_link_missing() -> Self {
        Self::not_found("Please double check the short URL exists.")
    }

    /// The canonical "not your short link" error.
    pub fn short_link_not_owned() -> Self {
        Self::forbidden("You don't have access to this content.")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.detail)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::Unauthenticated, "Permission Denied")]
    #[case(ErrorCode::Forbidden, "Permission Denied")]
    #[case(ErrorCode::NotFound, "Invalid Short URL")]
    #[case(ErrorCode::UnknownEmail, "Login Failed")]
    #[case(ErrorCode::CredentialMismatch, "Login Failed")]
    fn titles_follow_the_code(#[case] code: ErrorCode, #[case] title: &str) {
        assert_eq!(Error::new(code, "detail").title(), title);
    }

    #[rstest]
    fn blank_detail_falls_back_to_title() {
        let err = Error::new(ErrorCode::InvalidInput, "   ");
        assert_eq!(err.detail(), "Invalid Input");
    }

    #[tokio::test]
    async fn captures_scoped_trace_id() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let err = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(err.trace_id(), Some("00000000-0000-0000-0000-000000000000"));
    }

    #[rstest]
    fn for_identity_records_the_caller_email() {
        use crate::domain::{Email, PasswordDigest, UserId};

        let identity = Identity::new(
            UserId::new("admin").expect("id"),
            Email::new("a@a.com").expect("email"),
            PasswordDigest::new("digest").expect("digest"),
        );
        assert_eq!(Error::short_link_missing().user_email(), None);
        let err = Error::short_link_missing().for_identity(&identity);
        assert_eq!(err.user_email(), Some("a@a.com"));
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn display_includes_code_label() {
        let err = Error::short_link_not_owned();
        assert_eq!(
            err.to_string(),
            "forbidden: You don't have access to this content."
        );
    }
}
