//! Server configuration for Zero-FAF-Builder.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Site settings (MCP server URL, template repo, delays) come from
//! [`SiteConfig::from_lookup`]; this module adds the process-level settings.

use std::net::SocketAddr;
use std::time::Duration;

use faf_builder_core::config::SiteConfig;

/// Default listener when neither `FAF_BIND_ADDR` nor `PORT` is set.
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// How often closed intake sessions are swept, and how long a closed
    /// session is kept before it is evicted.
    pub session_sweep_interval: Duration,
    /// How long an open session may go without input or submit before the
    /// sweeper closes and evicts it.
    pub session_idle_ttl: Duration,
    /// Settings rendered into the page and handed to intake sessions.
    pub site: SiteConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (hosting-platform convention, binds to `0.0.0.0`)
    /// - `FAF_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `FAF_LOG_LEVEL` — log filter (default: `info`)
    /// - `FAF_SESSION_SWEEP_INTERVAL` — seconds between session sweeps (default: `60`)
    /// - `FAF_SESSION_IDLE_TTL` — seconds before an untouched open session is evicted (default: `900`)
    /// - every `FAF_*` site variable read by [`SiteConfig::from_lookup`]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        // Priority: FAF_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = get("FAF_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(DEFAULT_BIND_ADDR))
        } else if let Some(port_str) = get("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_BIND_ADDR.1);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(DEFAULT_BIND_ADDR)
        };

        let log_level = get("FAF_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let secs = |key: &str, fallback: u64| {
            get(key)
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map_or(Duration::from_secs(fallback), Duration::from_secs)
        };
        let session_sweep_interval = secs("FAF_SESSION_SWEEP_INTERVAL", 60);
        let session_idle_ttl = secs("FAF_SESSION_IDLE_TTL", 900);

        Self {
            bind_addr,
            log_level,
            session_sweep_interval,
            session_idle_ttl,
            site: SiteConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.session_sweep_interval, Duration::from_secs(60));
        assert_eq!(config.session_idle_ttl, Duration::from_secs(900));
        assert_eq!(config.site, SiteConfig::default());
    }

    #[test]
    fn port_binds_all_interfaces() {
        let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "8080".to_owned()));
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_wins_over_port() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".to_owned()),
            "FAF_BIND_ADDR" => Some("127.0.0.1:4000".to_owned()),
            _ => None,
        });
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 4000)));
    }

    #[test]
    fn site_overrides_pass_through() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "FAF_MCP_SERVER_URL").then(|| "https://mcp.internal".to_owned())
        });
        assert_eq!(config.site.mcp_server_url, "https://mcp.internal");
    }

    #[test]
    fn zero_sweep_interval_falls_back() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "FAF_SESSION_SWEEP_INTERVAL").then(|| "0".to_owned())
        });
        assert_eq!(config.session_sweep_interval, Duration::from_secs(60));
    }

    #[test]
    fn idle_ttl_override() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "FAF_SESSION_IDLE_TTL").then(|| "120".to_owned())
        });
        assert_eq!(config.session_idle_ttl, Duration::from_secs(120));
    }
}
