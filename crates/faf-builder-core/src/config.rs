//! Site configuration for Zero-FAF-Builder.
//!
//! The configuration is an explicit object handed to every component at
//! construction time. Only the binaries call [`SiteConfig::from_env`]; the
//! library itself never reads the environment.

use std::time::Duration;

/// Fallback MCP server URL embedded in the setup command.
pub const DEFAULT_MCP_SERVER_URL: &str = "https://grok-faf-mcp.vercel.app";

/// Fallback template repository used by the deploy deep-link.
pub const DEFAULT_TEMPLATE_REPO_URL: &str = "https://github.com/wolfe-jam/zero-faf-builder";

/// Fallback duration of the simulated GitHub submission.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Fallback duration the "copied" indicator stays lit.
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// MCP server URL passed to `faf-cli init --mcp=`.
    pub mcp_server_url: String,
    /// Repository cloned by the "Start fresh" deploy flow.
    pub template_repo_url: String,
    /// How long a simulated submission stays in `Submitting`.
    pub submit_delay: Duration,
    /// How long the copy helper keeps its `copied` flag set.
    pub copy_feedback: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            mcp_server_url: DEFAULT_MCP_SERVER_URL.to_owned(),
            template_repo_url: DEFAULT_TEMPLATE_REPO_URL.to_owned(),
            submit_delay: DEFAULT_SUBMIT_DELAY,
            copy_feedback: DEFAULT_COPY_FEEDBACK,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FAF_MCP_SERVER_URL` — MCP server URL (default: `https://grok-faf-mcp.vercel.app`)
    /// - `FAF_TEMPLATE_REPO_URL` — template repo for the deploy link
    ///   (default: `https://github.com/wolfe-jam/zero-faf-builder`)
    /// - `FAF_SUBMIT_DELAY_MS` — simulated submission delay (default: `1500`)
    /// - `FAF_COPY_FEEDBACK_MS` — "copied" indicator duration (default: `2000`)
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Used by [`from_env`](Self::from_env) and by tests that must not touch
    /// the process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let millis = |key: &str, fallback: Duration| {
            get(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map_or(fallback, Duration::from_millis)
        };

        Self {
            mcp_server_url: get("FAF_MCP_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_MCP_SERVER_URL.to_owned()),
            template_repo_url: get("FAF_TEMPLATE_REPO_URL")
                .unwrap_or_else(|| DEFAULT_TEMPLATE_REPO_URL.to_owned()),
            submit_delay: millis("FAF_SUBMIT_DELAY_MS", DEFAULT_SUBMIT_DELAY),
            copy_feedback: millis("FAF_COPY_FEEDBACK_MS", DEFAULT_COPY_FEEDBACK),
        }
    }

    /// Override the MCP server URL.
    #[must_use]
    pub fn with_mcp_server_url(mut self, url: impl Into<String>) -> Self {
        self.mcp_server_url = url.into();
        self
    }

    /// Override the template repository URL.
    #[must_use]
    pub fn with_template_repo_url(mut self, url: impl Into<String>) -> Self {
        self.template_repo_url = url.into();
        self
    }

    /// Override the simulated submission delay.
    #[must_use]
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn no_overrides_uses_fallbacks() {
        let config = SiteConfig::from_lookup(|_| None);
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.mcp_server_url, "https://grok-faf-mcp.vercel.app");
        assert_eq!(config.submit_delay, Duration::from_millis(1500));
        assert_eq!(config.copy_feedback, Duration::from_millis(2000));
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("FAF_MCP_SERVER_URL", "https://mcp.example.dev"),
            ("FAF_TEMPLATE_REPO_URL", "https://github.com/acme/template"),
            ("FAF_SUBMIT_DELAY_MS", "10"),
        ]));
        assert_eq!(config.mcp_server_url, "https://mcp.example.dev");
        assert_eq!(config.template_repo_url, "https://github.com/acme/template");
        assert_eq!(config.submit_delay, Duration::from_millis(10));
        assert_eq!(config.copy_feedback, DEFAULT_COPY_FEEDBACK);
    }

    #[test]
    fn empty_values_fall_back() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("FAF_MCP_SERVER_URL", ""),
            ("FAF_TEMPLATE_REPO_URL", ""),
        ]));
        assert_eq!(config.mcp_server_url, DEFAULT_MCP_SERVER_URL);
        assert_eq!(config.template_repo_url, DEFAULT_TEMPLATE_REPO_URL);
    }

    #[test]
    fn unparsable_delay_falls_back() {
        let config = SiteConfig::from_lookup(lookup_from(&[("FAF_SUBMIT_DELAY_MS", "soon")]));
        assert_eq!(config.submit_delay, DEFAULT_SUBMIT_DELAY);
    }
}
