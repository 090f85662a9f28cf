//! Account handlers: registration, login, logout and the landing redirect.
//!
//! ```text
//! GET  /            -> /urls or /login
//! GET  /register    POST /register   email=a@a.com&password=123
//! GET  /login       POST /login      email=a@a.com&password=123
//! POST /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::inbound::http::ApiResult;
use crate::inbound::http::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{LoginView, RegisterView, page};

/// Form body shared by registration and login.
///
/// Missing fields deserialize as empty strings so the domain reports them as
/// invalid input rather than the extractor rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Send signed-in callers to their links and everyone else to login.
#[get("/")]
pub async fn landing(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    if state.caller(&session).await.is_some() {
        see_other("/urls")
    } else {
        see_other("/login")
    }
}

/// Registration form.
#[get("/register")]
pub async fn register_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if state.caller(&session).await.is_some() {
        return Ok(see_other("/urls"));
    }
    page(&RegisterView { user_email: None })
}

/// Create an account and sign it in.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let identity = state
        .identities
        .register(&form.email, &form.password)
        .await?;
    session.persist_user(identity.id())?;
    Ok(see_other("/urls"))
}

/// Login form.
#[get("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if state.caller(&session).await.is_some() {
        return Ok(see_other("/urls"));
    }
    page(&LoginView { user_email: None })
}

/// Check credentials and start a fresh session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let identity = state
        .identities
        .authenticate(&form.email, &form.password)
        .await?;
    session.persist_user(identity.id())?;
    info!(user_id = %identity.id(), "signed in");
    Ok(see_other("/urls"))
}

/// Forget the session.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/login")
}
