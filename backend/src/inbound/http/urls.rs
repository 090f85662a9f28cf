//! Short-link management handlers. All of them need a signed-in caller;
//! the per-link routes also need the caller to own the link.
//!
//! ```text
//! GET  /urls               GET /urls.json           GET /urls/new
//! POST /urls               longURL=http://example.com
//! GET  /urls/{id}          POST /urls/{id}          POST /urls/{id}/delete
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{ShortId, ShortLink};
use crate::inbound::http::ApiResult;
use crate::inbound::http::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{UrlsIndexView, UrlsNewView, UrlsShowView, email_of, page};

/// Form body carrying a long URL.
#[derive(Debug, Default, Deserialize)]
pub struct LongUrlForm {
    #[serde(rename = "longURL", default)]
    pub long_url: String,
}

/// List the caller's links.
#[get("/urls")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = state.access(&session, None).await.require_identity()?;
    let links = state.links.list_by_owner(identity.id()).await;
    page(&UrlsIndexView::new(&identity, &links))
}

/// The caller's links as `{ shortId: { longUrl, ownerId } }`.
#[get("/urls.json")]
pub async fn index_json(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<BTreeMap<ShortId, ShortLink>>> {
    let identity = state.access(&session, None).await.require_identity()?;
    Ok(web::Json(state.links.list_by_owner(identity.id()).await))
}

/// New-link form; anonymous callers are sent to login.
#[get("/urls/new")]
pub async fn new_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(identity) = state.caller(&session).await else {
        return Ok(see_other("/login"));
    };
    page(&UrlsNewView {
        user_email: email_of(Some(&identity)),
    })
}

/// Allocate a short id for the submitted URL.
#[post("/urls")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LongUrlForm>,
) -> ApiResult<HttpResponse> {
    let identity = state.access(&session, None).await.require_identity()?;
    let id = state
        .links
        .allocate(&form.long_url, &identity)
        .await
        .map_err(|err| err.for_identity(&identity))?;
    Ok(see_other(&format!("/urls/{id}")))
}

/// Show one owned link with its edit form.
#[get("/urls/{id}")]
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let grant = state.access(&session, Some(path.as_str())).await.require_grant()?;
    page(&UrlsShowView {
        user_email: email_of(Some(&grant.identity)),
        short_id: grant.short_id.to_string(),
        long_url: grant.link.long_url().to_string(),
    })
}

/// Point an owned link somewhere else.
#[post("/urls/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<LongUrlForm>,
) -> ApiResult<HttpResponse> {
    let grant = state.access(&session, Some(path.as_str())).await.require_grant()?;
    state
        .links
        .update(grant.short_id.as_ref(), &form.long_url, grant.identity.id())
        .await
        .map_err(|err| err.for_identity(&grant.identity))?;
    Ok(see_other(&format!("/urls/{}", grant.short_id)))
}

/// Delete an owned link.
#[post("/urls/{id}/delete")]
pub async fn delete(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let grant = state.access(&session, Some(path.as_str())).await.require_grant()?;
    state
        .links
        .delete(grant.short_id.as_ref(), grant.identity.id())
        .await
        .map_err(|err| err.for_identity(&grant.identity))?;
    Ok(see_other("/urls"))
}

#[cfg(test)]
mod tests {
    //! Handler tests over in-memory services.
    use super::*;
    use crate::inbound::http::test_utils::{
        body_string, demo_login, form_post, get, location, sign_in, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    #[rstest]
    #[case("/urls")]
    #[case("/urls.json")]
    #[case("/urls/b2xVn2")]
    #[actix_web::test]
    async fn anonymous_reads_need_login(#[case] uri: &str) {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let res = test::call_service(&svc, get(uri, None).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_string(res).await;
        assert!(body.contains("Please log in to access this content."));
        assert!(!body.contains("Logged in as"));
    }

    #[rstest]
    #[case("/urls", "longURL=http%3A%2F%2Fx.example")]
    #[case("/urls/b2xVn2", "longURL=http%3A%2F%2Fx.example")]
    #[case("/urls/b2xVn2/delete", "")]
    #[actix_web::test]
    async fn anonymous_writes_need_login(#[case] uri: &str, #[case] body: &str) {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let res = test::call_service(&svc, form_post(uri, body, None).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(app.state.links.get("b2xVn2").await.is_some());
    }

    #[rstest]
    #[actix_web::test]
    async fn new_form_redirects_anonymous_callers() {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let res = test::call_service(&svc, get("/urls/new", None).to_request()).await;
        assert_eq!(location(&res), Some("/login"));
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_shows_owned_links() {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let cookie = sign_in(&svc, demo_login().to_request()).await;

        let res = test::call_service(&svc, get("/urls", Some(cookie.clone())).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_string(res).await;
        assert!(body.contains("http://www.lighthouselabs.ca"));
        assert!(body.contains("/urls/9sm5xK"));

        let res = test::call_service(&svc, get("/urls.json", Some(cookie)).to_request()).await;
        let json: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(
            json,
            serde_json::json!({
                "9sm5xK": { "longUrl": "http://www.google.com", "ownerId": "admin" },
                "b2xVn2": { "longUrl": "http://www.lighthouselabs.ca", "ownerId": "admin" }
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn create_show_update_delete() {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let cookie = sign_in(&svc, demo_login().to_request()).await;

        let res = test::call_service(
            &svc,
            form_post("/urls", "longURL=http%3A%2F%2Fexample.com", Some(cookie.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let target = location(&res).expect("location").to_owned();
        let id = target.trim_start_matches("/urls/").to_owned();

        let res = test::call_service(&svc, get(&target, Some(cookie.clone())).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_string(res).await.contains("http://example.com"));

        let res = test::call_service(
            &svc,
            form_post(&target, "longURL=http%3A%2F%2Fother.com", Some(cookie.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(location(&res), Some(target.as_str()));
        assert_eq!(
            app.state.links.resolve_redirect(&id).await.expect("updated").as_ref(),
            "http://other.com"
        );

        let res = test::call_service(
            &svc,
            form_post(&format!("{target}/delete"), "", Some(cookie)).to_request(),
        )
        .await;
        assert_eq!(location(&res), Some("/urls"));
        assert!(app.state.links.get(&id).await.is_none());
    }

    #[rstest]
    #[case("longURL=")]
    #[case("longURL=javascript%3Aalert(1)")]
    #[case("")]
    #[actix_web::test]
    async fn create_rejects_invalid_urls(#[case] body: &str) {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let cookie = sign_in(&svc, demo_login().to_request()).await;
        let res =
            test::call_service(&svc, form_post("/urls", body, Some(cookie)).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(res).await.contains("Logged in as: a@a.com"));
    }

    #[rstest]
    #[actix_web::test]
    async fn foreign_links_are_forbidden() {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let res = test::call_service(
            &svc,
            form_post("/register", "email=b%40b.com&password=pw", None).to_request(),
        )
        .await;
        let cookie = crate::inbound::http::test_utils::session_cookie(&res).expect("cookie");

        for req in [
            get("/urls/b2xVn2", Some(cookie.clone())),
            form_post("/urls/b2xVn2", "longURL=", Some(cookie.clone())),
            form_post("/urls/b2xVn2/delete", "", Some(cookie.clone())),
        ] {
            let res = test::call_service(&svc, req.to_request()).await;
            assert_eq!(res.status(), StatusCode::FORBIDDEN);
            assert!(body_string(res).await.contains("Logged in as: b@b.com"));
        }
        assert!(app.state.links.get("b2xVn2").await.is_some());

        let res = test::call_service(&svc, get("/urls", Some(cookie)).to_request()).await;
        assert!(!body_string(res).await.contains("b2xVn2"));
    }

    #[rstest]
    #[case("/urls/nope42")]
    #[case("/urls/bad.id")]
    #[actix_web::test]
    async fn unknown_links_are_not_found(#[case] uri: &str) {
        let app = test_app().await;
        let svc = test::init_service(app.app()).await;
        let cookie = sign_in(&svc, demo_login().to_request()).await;
        let res = test::call_service(&svc, get(uri, Some(cookie)).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_string(res).await;
        assert!(body.contains("Invalid Short URL"));
        assert!(body.contains("Logged in as: a@a.com"));
    }
}
