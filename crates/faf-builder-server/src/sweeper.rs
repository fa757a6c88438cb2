//! Background eviction of closed intake sessions.
//!
//! Sessions close themselves when a simulated submission completes, but
//! clients that never send `DELETE` would leave them in the registry. The
//! sweeper removes sessions that have been closed for at least one interval,
//! which gives pollers one full interval to observe the closed view. Open
//! sessions nobody has touched for the idle TTL are closed and removed too.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::AppState;

/// Periodically evict closed sessions until shutdown is signalled.
pub async fn session_sweeper(
    state: Arc<AppState>,
    shutdown: &mut watch::Receiver<bool>,
    interval: Duration,
    idle_ttl: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    info!(
        interval_secs = interval.as_secs(),
        idle_ttl_secs = idle_ttl.as_secs(),
        "session sweeper started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let evicted = state.sessions.sweep(interval, idle_ttl).await;
                if evicted > 0 {
                    let remaining = state.sessions.len().await;
                    debug!(evicted, remaining, "session sweep complete");
                }
            }
            _ = shutdown.changed() => {
                info!("session sweeper shutting down");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use faf_builder_core::config::SiteConfig;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_closed_sessions_and_stops_on_shutdown() {
        let state = Arc::new(AppState::new(SiteConfig::default()));
        let interval = Duration::from_secs(60);

        let idle_ttl = Duration::from_secs(600);

        let (open_id, _) = state.sessions.open(Duration::from_millis(1500)).await.unwrap();
        let (_, closed) = state.sessions.open(Duration::from_millis(1500)).await.unwrap();
        closed.close().await;

        let (tx, mut rx) = watch::channel(false);
        let worker = {
            let state = Arc::clone(&state);
            tokio::spawn(async move { session_sweeper(state, &mut rx, interval, idle_ttl).await })
        };

        tokio::time::sleep(interval * 2 + Duration::from_secs(1)).await;
        assert_eq!(state.sessions.len().await, 1);
        assert!(state.sessions.get(&open_id).await.is_some());

        tokio::time::sleep(idle_ttl).await;
        assert!(state.sessions.is_empty().await, "untouched session is evicted");

        tx.send(true).unwrap();
        worker.await.unwrap();
    }
}
