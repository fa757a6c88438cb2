//! HTTP route handlers.

pub mod api;
pub mod sessions;
pub mod ui;
