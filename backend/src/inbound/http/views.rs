//! Compiled HTML views.
//!
//! Each struct binds one template under `backend/templates/`. Every view
//! carries the signed-in user's email (if any) for the shared header.

use std::collections::BTreeMap;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use askama::Template;

use crate::domain::{Error, Identity, ShortId, ShortLink};

/// Registration form.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterView {
    pub user_email: Option<String>,
}

/// Login form.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginView {
    pub user_email: Option<String>,
}

/// One row of the link listing.
pub struct LinkRow {
    pub short_id: String,
    pub long_url: String,
}

/// The caller's links.
#[derive(Template)]
#[template(path = "urls_index.html")]
pub struct UrlsIndexView {
    pub user_email: Option<String>,
    pub links: Vec<LinkRow>,
}

/// New-link form.
#[derive(Template)]
#[template(path = "urls_new.html")]
pub struct UrlsNewView {
    pub user_email: Option<String>,
}

/// A single link with its edit form.
#[derive(Template)]
#[template(path = "urls_show.html")]
pub struct UrlsShowView {
    pub user_email: Option<String>,
    pub short_id: String,
    pub long_url: String,
}

/// Title/detail error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub user_email: Option<String>,
    pub title: String,
    pub detail: String,
    pub trace_id: Option<String>,
}

/// Header email for `identity`.
pub fn email_of(identity: Option<&Identity>) -> Option<String> {
    identity.map(|identity| identity.email().to_string())
}

impl UrlsIndexView {
    /// Build the listing from a directory query.
    pub fn new(identity: &Identity, links: &BTreeMap<ShortId, ShortLink>) -> Self {
        Self {
            user_email: email_of(Some(identity)),
            links: links
                .iter()
                .map(|(id, link)| LinkRow {
                    short_id: id.to_string(),
                    long_url: link.long_url().to_string(),
                })
                .collect(),
        }
    }
}

/// Render `view` with the given status as an HTML response.
///
/// # Errors
/// Returns an internal error when the template fails to render.
pub fn render<T: Template>(status: StatusCode, view: &T) -> Result<HttpResponse, Error> {
    let body = view
        .render()
        .map_err(|err| Error::internal(format!("failed to render view: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}

/// Render `view` as a `200 OK` page.
///
/// # Errors
/// Returns an internal error when the template fails to render.
pub fn page<T: Template>(view: &T) -> Result<HttpResponse, Error> {
    render(StatusCode::OK, view)
}
