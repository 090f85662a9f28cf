//! Shortlink entry-point: loads settings, wires adapters and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shortlink::domain::{AlphanumericIdGenerator, IdentityService, LinkDirectory, seed_demo_data};
use shortlink::inbound::http::health::HealthState;
use shortlink::inbound::http::session_config::{BuildMode, session_settings_from_env};
use shortlink::inbound::http::state::HttpState;
use shortlink::outbound::hashing::Argon2CredentialHasher;
use shortlink::outbound::memory::{InMemoryIdentityRegistry, InMemoryLinkStore};

use server::{AppSettings, ServerConfig, create_server};

fn build_http_state() -> HttpState {
    let ids = Arc::new(AlphanumericIdGenerator);
    let identities = IdentityService::new(
        Arc::new(InMemoryIdentityRegistry::new()),
        Arc::new(Argon2CredentialHasher::new()),
        ids.clone(),
    );
    let links = LinkDirectory::new(Arc::new(InMemoryLinkStore::new()), ids);
    HttpState::new(Arc::new(identities), Arc::new(links))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let http_state = build_http_state();
    if settings.seed_demo_data {
        seed_demo_data(&http_state.identities, &http_state.links)
            .await
            .map_err(|e| std::io::Error::other(format!("demo seeding failed: {e}")))?;
    }

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session.key, session.cookie_secure, bind_addr);
    info!(%bind_addr, "starting server");
    let server = create_server(health_state, web::Data::new(http_state), config)?;
    server.await
}
