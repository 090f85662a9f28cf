//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the error view with a consistent
//! status code.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};
use crate::inbound::http::views::ErrorView;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_DETAIL: &str = "The server could not complete the request.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidInput | ErrorCode::DuplicateEmail => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::UnknownEmail | ErrorCode::CredentialMismatch | ErrorCode::Forbidden => {
            StatusCode::FORBIDDEN
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn view_for(error: &Error, trace_id: Option<String>) -> ErrorView {
    let detail = if error.code() == ErrorCode::InternalError {
        INTERNAL_DETAIL.to_owned()
    } else {
        error.detail().to_owned()
    };
    ErrorView {
        user_email: error.user_email().map(str::to_owned),
        title: error.title().to_owned(),
        detail,
        trace_id,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = self
            .trace_id()
            .map(str::to_owned)
            .or_else(|| TraceId::current().map(|id| id.to_string()));

        match self.code() {
            ErrorCode::InternalError => {
                error!(trace_id = trace_id.as_deref(), detail = self.detail(), "internal error");
            }
            code => warn!(code = code.as_str(), detail = self.detail(), "request rejected"),
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = trace_id.as_deref() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        match view_for(self, trace_id).render() {
            Ok(body) => builder.content_type(ContentType::html()).body(body),
            Err(render_error) => {
                error!(error = %render_error, "failed to render error view");
                builder
                    .content_type(ContentType::plaintext())
                    .body(self.title())
            }
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests;
