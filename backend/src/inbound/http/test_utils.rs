//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, ContentType};
use actix_web::{App, test, web};

use crate::domain::seed_demo_data;
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::session::session_middleware;
use crate::inbound::http::state::HttpState;
use crate::test_support::harness;

/// Build a session middleware configured for tests.
///
/// Same cookie settings as production with a fresh key and `Secure` off so
/// plain-HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(Key::generate(), false)
}

/// Seeded in-memory services plus the app factory that serves them.
pub struct TestApp {
    pub state: HttpState,
    health: web::Data<HealthState>,
}

/// Services over fresh adapters, seeded with the demo identity and links.
pub async fn test_app() -> TestApp {
    let h = harness();
    seed_demo_data(&h.identities, &h.links)
        .await
        .expect("demo data seeds");
    let health = HealthState::new();
    health.mark_ready();
    TestApp {
        state: HttpState::new(Arc::new(h.identities), Arc::new(h.links)),
        health: web::Data::new(health),
    }
}

impl TestApp {
    /// Application with every route and a test session middleware.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let state = web::Data::new(self.state.clone());
        let health = self.health.clone();
        App::new()
            .wrap(test_session_middleware())
            .configure(move |cfg| configure(cfg, state, health))
    }
}

/// `GET uri`, optionally carrying a session cookie.
pub fn get(uri: &str, cookie: Option<Cookie<'static>>) -> test::TestRequest {
    with_cookie(test::TestRequest::get().uri(uri), cookie)
}

/// Form-encoded `POST uri`, optionally carrying a session cookie.
pub fn form_post(uri: &str, body: &str, cookie: Option<Cookie<'static>>) -> test::TestRequest {
    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(ContentType::form_url_encoded())
        .set_payload(body.to_owned());
    with_cookie(req, cookie)
}

/// Login request for the seeded demo identity.
pub fn demo_login() -> test::TestRequest {
    form_post("/login", "email=a%40a.com&password=123", None)
}

fn with_cookie(req: test::TestRequest, cookie: Option<Cookie<'static>>) -> test::TestRequest {
    match cookie {
        Some(cookie) => req.cookie(cookie),
        None => req,
    }
}

/// Send a login/registration request and return the issued session cookie.
pub async fn sign_in<S, R, B>(svc: &S, req: R) -> Cookie<'static>
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(svc, req).await;
    session_cookie(&res).expect("sign-in issues a session cookie")
}

/// The `session` cookie set on a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// The `Location` header of a response.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Read a response body as UTF-8.
pub async fn body_string<B: MessageBody>(res: ServiceResponse<B>) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
