//! Application settings loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Listen address and startup toggles, layered from CLI flags, the
/// environment (`SHORTLINK_*`) and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHORTLINK")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Seed the demo identity and links on startup.
    #[ortho_config(default = false)]
    pub seed_demo_data: bool,
}

/// Raised when the configured host is not an IP address.
#[derive(Debug, thiserror::Error)]
#[error("invalid SHORTLINK_HOST '{host}': {source}")]
pub struct InvalidHost {
    host: String,
    #[source]
    source: std::net::AddrParseError,
}

impl AppSettings {
    /// Socket address to bind, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidHost> {
        let host = match self.host.as_deref() {
            Some(raw) => raw.trim().parse().map_err(|source| InvalidHost {
                host: raw.to_owned(),
                source,
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }
}
