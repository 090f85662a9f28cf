//! HTTP inbound adapter: HTML pages, form posts and redirects.

pub mod accounts;
pub mod error;
pub mod health;
pub mod redirect;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod urls;
pub mod views;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

pub use error::ApiResult;

use health::HealthState;
use state::HttpState;

/// `303 See Other` to `location`, the answer to every successful form post.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Register shared state and every route on `cfg`.
///
/// `/urls/new` and `/urls.json` are registered ahead of `/urls/{id}` so the
/// literal paths win.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use shortlink::domain::{AlphanumericIdGenerator, IdentityService, LinkDirectory};
/// use shortlink::inbound::http::configure;
/// use shortlink::inbound::http::health::HealthState;
/// use shortlink::inbound::http::state::HttpState;
/// use shortlink::outbound::hashing::Argon2CredentialHasher;
/// use shortlink::outbound::memory::{InMemoryIdentityRegistry, InMemoryLinkStore};
///
/// let ids = Arc::new(AlphanumericIdGenerator);
/// let state = HttpState::new(
///     Arc::new(IdentityService::new(
///         Arc::new(InMemoryIdentityRegistry::new()),
///         Arc::new(Argon2CredentialHasher::new()),
///         ids.clone(),
///     )),
///     Arc::new(LinkDirectory::new(Arc::new(InMemoryLinkStore::new()), ids)),
/// );
/// let state = web::Data::new(state);
/// let health = web::Data::new(HealthState::new());
/// let _app = App::new().configure(move |cfg| configure(cfg, state, health));
/// ```
pub fn configure(
    cfg: &mut web::ServiceConfig,
    state: web::Data<HttpState>,
    health: web::Data<HealthState>,
) {
    cfg.app_data(state)
        .app_data(health)
        .service(accounts::landing)
        .service(accounts::register_form)
        .service(accounts::register)
        .service(accounts::login_form)
        .service(accounts::login)
        .service(accounts::logout)
        .service(urls::index)
        .service(urls::index_json)
        .service(urls::new_form)
        .service(urls::create)
        .service(urls::show)
        .service(urls::update)
        .service(urls::delete)
        .service(redirect::follow)
        .service(health::ready)
        .service(health::live);
}
