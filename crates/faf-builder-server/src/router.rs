//! Axum router assembly.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

/// Maximum in-flight requests against the session API.
const SESSION_CONCURRENCY_LIMIT: usize = 64;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Sessions hold a spawned task each; cap concurrent session traffic.
    let session_routes = routes::sessions::router()
        .layer(tower::limit::ConcurrencyLimitLayer::new(SESSION_CONCURRENCY_LIMIT));

    let app = Router::new()
        .merge(routes::ui::router())
        .merge(routes::api::router())
        .merge(session_routes)
        .fallback(routes::ui::not_found);

    with_middleware(app).with_state(state)
}

/// Wrap `app` in the server-wide middleware stack.
///
/// The response-header layers sit outside the panic boundary, so the error
/// page carries the same security headers as every other response.
pub fn with_middleware(app: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    app
        .layer(CatchPanicLayer::custom(routes::ui::panic_page))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}
