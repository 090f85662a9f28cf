//! Public redirect resolution.
//!
//! ```text
//! GET /u/{id}  -> 302 Location: <long URL>
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Redirect anyone to the long URL filed under `id`.
#[get("/u/{id}")]
pub async fn follow(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let long_url = state.links.resolve_redirect(path.as_str()).await?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, long_url.as_ref()))
        .finish())
}
