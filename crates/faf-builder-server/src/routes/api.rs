//! Stateless JSON endpoints: health, setup command, deploy link, and
//! one-shot GitHub URL validation with a clone preview.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use faf_builder_core::validate::{RepoRef, ValidationResult, clone_commands, validate};

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/setup-command", get(setup_command))
        .route("/api/deploy-link", get(deploy_link))
        .route("/api/github/validate", post(validate_url))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Serialize)]
struct SetupCommandResponse {
    command: String,
}

async fn setup_command(State(state): State<Arc<AppState>>) -> Json<SetupCommandResponse> {
    Json(SetupCommandResponse {
        command: state.setup_command.clone(),
    })
}

#[derive(Serialize)]
struct DeployLinkResponse {
    url: String,
}

async fn deploy_link(State(state): State<Arc<AppState>>) -> Json<DeployLinkResponse> {
    Json(DeployLinkResponse {
        url: state.deploy_link.clone(),
    })
}

/// Request body for `POST /api/github/validate`.
#[derive(Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub url: String,
}

/// Classification of a candidate URL plus the clone preview when valid.
#[derive(Serialize)]
pub struct ValidateResponse {
    pub outcome: &'static str,
    pub message: Option<&'static str>,
    pub repo: Option<RepoRef>,
    pub commands: Vec<String>,
}

impl From<ValidationResult> for ValidateResponse {
    fn from(result: ValidationResult) -> Self {
        let (repo, commands) = match &result {
            ValidationResult::Valid(url) => (RepoRef::from_url(url), clone_commands(url)),
            _ => (None, Vec::new()),
        };
        Self {
            outcome: result.outcome(),
            message: result.message(),
            repo,
            commands,
        }
    }
}

async fn validate_url(Json(body): Json<ValidateRequest>) -> Json<ValidateResponse> {
    Json(validate(&body.url).into())
}
