//! Zero-FAF-Builder HTTP server.
//!
//! Serves the onboarding landing page at `/`, the not-found and error
//! boundary pages, and a small JSON API under `/api` that drives GitHub
//! intake sessions backed by `faf-builder-core`.

pub mod config;
pub mod error;
pub mod router;
pub mod routes;
pub mod state;
pub mod sweeper;
