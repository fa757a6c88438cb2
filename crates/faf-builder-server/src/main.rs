//! Zero-FAF-Builder server entry point.
//!
//! Loads configuration, starts the Axum HTTP server with graceful shutdown,
//! and runs the session sweeper alongside it. On shutdown every open intake
//! session is closed so no simulated submission outlives the server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use faf_builder_server::config::ServerConfig;
use faf_builder_server::router::build_router;
use faf_builder_server::state::AppState;
use faf_builder_server::sweeper::session_sweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        mcp_server_url = %config.site.mcp_server_url,
        template_repo_url = %config.site.template_repo_url,
        submit_delay_ms =
            u64::try_from(config.site.submit_delay.as_millis()).unwrap_or(u64::MAX),
        "Zero-FAF-Builder starting"
    );

    let state = Arc::new(AppState::new(config.site.clone()));

    // Shutdown signal channel.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = {
        let state = Arc::clone(&state);
        let mut rx = shutdown_rx.clone();
        let interval = config.session_sweep_interval;
        let idle_ttl = config.session_idle_ttl;
        tokio::spawn(async move {
            session_sweeper(state, &mut rx, interval, idle_ttl).await;
        })
    };

    let app = build_router(Arc::clone(&state));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Zero-FAF-Builder listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("server error")?;

    info!("waiting for background workers to stop");
    let _ = tokio::time::timeout(Duration::from_secs(10), sweeper_handle).await;

    let closed = state.sessions.close_all().await;
    info!(closed, "Zero-FAF-Builder stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM, then broadcast shutdown.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    let _ = shutdown_tx.send(true);
}
