//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain services and stay testable without a listener.

use std::sync::Arc;

use crate::domain::{Access, Identity, IdentityService, LinkDirectory};
use crate::inbound::http::session::SessionContext;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identities: Arc<IdentityService>,
    pub links: Arc<LinkDirectory>,
}

impl HttpState {
    /// Bundle the services handlers call.
    pub fn new(identities: Arc<IdentityService>, links: Arc<LinkDirectory>) -> Self {
        Self { identities, links }
    }

    /// Resolve the identity named by the request's session, if any.
    pub async fn caller(&self, session: &SessionContext) -> Option<Identity> {
        self.identities
            .resolve_identity(session.user_id().as_ref())
            .await
    }

    /// Resolve the caller and classify the request for `short_id`.
    pub async fn access(&self, session: &SessionContext, short_id: Option<&str>) -> Access {
        let caller = self.caller(session).await;
        self.links.classify(caller, short_id).await
    }
}
