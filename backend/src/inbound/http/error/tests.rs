//! Tests for the error view mapping.

use actix_web::body::to_bytes;
use rstest::rstest;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(response: HttpResponse) -> String {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[rstest]
#[case(ErrorCode::InvalidInput, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::DuplicateEmail, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::UnknownEmail, StatusCode::FORBIDDEN)]
#[case(ErrorCode::CredentialMismatch, StatusCode::FORBIDDEN)]
#[case(ErrorCode::Unauthenticated, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&Error::new(code, "x")), status);
}

#[rstest]
#[actix_web::test]
async fn login_required_renders_title_and_detail() {
    let response = ResponseError::error_response(&Error::login_required());
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    let body = body_of(response).await;
    assert!(body.contains("Permission Denied"));
    assert!(body.contains("Please log in to access this content."));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let error = Error::internal("database password is hunter2").with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );
    let body = body_of(response).await;
    assert!(!body.contains("hunter2"));
    assert!(body.contains(INTERNAL_DETAIL));
    assert!(body.contains(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn responses_are_html() {
    let response = ResponseError::error_response(&Error::short_link_missing());
    assert_eq!(
        response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/html; charset=utf-8")
    );
    assert!(body_of(response).await.contains("Invalid Short URL"));
}

#[rstest]
#[actix_web::test]
async fn signed_in_errors_keep_the_header_email() {
    use crate::domain::{Email, Identity, PasswordDigest, UserId};

    let identity = Identity::new(
        UserId::new("admin").expect("id"),
        Email::new("a@a.com").expect("email"),
        PasswordDigest::new("digest").expect("digest"),
    );
    let response =
        ResponseError::error_response(&Error::short_link_not_owned().for_identity(&identity));
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_of(response).await;
    assert!(body.contains("Logged in as: a@a.com"));
    assert!(!body.contains("href=\"/register\""));
}
