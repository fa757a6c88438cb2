//! Shared application state for the Zero-FAF-Builder server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the site configuration, the rendered
//! setup command and deploy link, and the registry of open intake sessions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use faf_builder_core::config::SiteConfig;
use faf_builder_core::intake::IntakeSession;
use faf_builder_core::links;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Site configuration.
    pub site: SiteConfig,
    /// `npx faf-cli@latest init --mcp=...`, rendered once at startup.
    pub setup_command: String,
    /// Deploy deep-link for the template repository.
    pub deploy_link: String,
    /// Open GitHub intake sessions keyed by session id.
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Build the state for the given site configuration.
    #[must_use]
    pub fn new(site: SiteConfig) -> Self {
        Self {
            setup_command: links::setup_command(&site),
            deploy_link: links::deploy_link(&site),
            sessions: SessionRegistry::default(),
            site,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

/// Upper bound on sessions tracked at once.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Registry of intake sessions, one per open GitHub view.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<IntakeSession>>>,
    max_sessions: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionRegistry {
    /// Registry that refuses to track more than `max_sessions` at once.
    #[must_use]
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Open a new session and return its id.
    ///
    /// Returns `None` when the registry is full.
    pub async fn open(&self, delay: Duration) -> Option<(Uuid, Arc<IntakeSession>)> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return None;
        }
        let id = Uuid::new_v4();
        let session = Arc::new(IntakeSession::new(delay));
        sessions.insert(id, Arc::clone(&session));
        Some((id, session))
    }

    /// Look up a session.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<IntakeSession>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove a session and close it, aborting any pending submission.
    ///
    /// Returns `false` if the session did not exist.
    pub async fn close(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id);
        match removed {
            Some(session) => {
                session.close().await;
                true
            }
            None => false,
        }
    }

    /// Evict sessions that have been closed for at least `grace`, and close
    /// and evict open sessions idle for at least `idle_ttl`.
    ///
    /// Returns the number of evicted sessions.
    pub async fn sweep(&self, grace: Duration, idle_ttl: Duration) -> usize {
        let snapshot: Vec<(Uuid, Arc<IntakeSession>)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, s)| (*id, Arc::clone(s)))
            .collect();

        let mut expired = Vec::new();
        for (id, session) in snapshot {
            if session.is_expired(grace).await {
                expired.push(id);
            } else if session.is_abandoned(idle_ttl).await {
                session.close().await;
                expired.push(id);
            }
        }

        if expired.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        for id in &expired {
            sessions.remove(id);
        }
        expired.len()
    }

    /// Close and drop every session. Used on shutdown.
    pub async fn close_all(&self) -> usize {
        let drained: Vec<Arc<IntakeSession>> =
            self.sessions.write().await.drain().map(|(_, s)| s).collect();
        for session in &drained {
            session.close().await;
        }
        drained.len()
    }

    /// Number of tracked sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are tracked.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1500);
    const IDLE_TTL: Duration = Duration::from_secs(600);

    #[tokio::test]
    async fn state_renders_links_from_site_config() {
        let state = AppState::new(SiteConfig::default().with_mcp_server_url("https://mcp.test"));
        assert_eq!(state.setup_command, "npx faf-cli@latest init --mcp=https://mcp.test");
        assert!(state.deploy_link.starts_with("https://vercel.com/new/clone?"));
    }

    #[tokio::test]
    async fn open_get_close() {
        let registry = SessionRegistry::default();
        let (id, _) = registry.open(DELAY).await.unwrap();
        assert!(registry.get(&id).await.is_some());
        assert!(registry.close(&id).await);
        assert!(registry.get(&id).await.is_none());
        assert!(!registry.close(&id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_evicts_only_sessions_closed_long_enough() {
        let registry = SessionRegistry::default();
        let grace = Duration::from_secs(60);

        let (open_id, _) = registry.open(DELAY).await.unwrap();
        let (closed_id, closed) = registry.open(DELAY).await.unwrap();
        closed.close().await;

        assert_eq!(registry.sweep(grace, IDLE_TTL).await, 0);
        tokio::time::sleep(grace).await;
        assert_eq!(registry.sweep(grace, IDLE_TTL).await, 1);

        assert!(registry.get(&open_id).await.is_some());
        assert!(registry.get(&closed_id).await.is_none());
    }

    #[tokio::test]
    async fn close_all_drains_registry() {
        let registry = SessionRegistry::default();
        let (_, a) = registry.open(DELAY).await.unwrap();
        registry.open(DELAY).await.unwrap();
        assert_eq!(registry.close_all().await, 2);
        assert!(registry.is_empty().await);
        assert!(!a.is_open().await);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_sessions_are_closed_and_evicted() {
        let registry = SessionRegistry::default();
        let grace = Duration::from_secs(60);
        for _ in 0..1000 {
            registry.open(DELAY).await.unwrap();
        }
        let (_, abandoned) = registry.open(DELAY).await.unwrap();
        let (active_id, active) = registry.open(DELAY).await.unwrap();

        for _ in 0..9 {
            tokio::time::sleep(grace).await;
            active.set_input("https://github.com/owner/repo").await.unwrap();
            assert_eq!(registry.sweep(grace, IDLE_TTL).await, 0);
        }

        tokio::time::sleep(grace).await;
        assert_eq!(registry.sweep(grace, IDLE_TTL).await, 1001);
        assert!(!abandoned.is_open().await);
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(&active_id).await.is_some());
    }

    #[tokio::test]
    async fn full_registry_refuses_new_sessions() {
        let registry = SessionRegistry::with_capacity(2);
        registry.open(DELAY).await.unwrap();
        let (id, _) = registry.open(DELAY).await.unwrap();
        assert!(registry.open(DELAY).await.is_none());

        registry.close(&id).await;
        assert!(registry.open(DELAY).await.is_some());
    }
}
