//! GitHub intake session routes.
//!
//! Each open "Add FAF to your GitHub repo" view owns one session. The page
//! opens a session when the view opens, pushes every input change, submits
//! on click or Enter, polls the view while submitting, and deletes the
//! session when the view is dismissed.
//!
//! A submit may carry the text it was issued for. That text is applied and
//! validated under one lock, so an input update still in flight cannot make
//! the submit see stale input.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use faf_builder_core::intake::{IntakeSession, SessionView};

use crate::error::AppError;
use crate::state::AppState;

/// Build the session router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/github/sessions", post(open_session))
        .route(
            "/api/github/sessions/{id}",
            get(read_session).delete(close_session),
        )
        .route("/api/github/sessions/{id}/input", put(update_input))
        .route("/api/github/sessions/{id}/submit", post(submit_session))
}

#[derive(Serialize)]
struct OpenSessionResponse {
    id: Uuid,
    view: SessionView,
}

#[derive(Deserialize)]
struct InputRequest {
    #[serde(default)]
    input: String,
}

#[derive(Deserialize)]
struct SubmitRequest {
    input: String,
}

#[derive(Serialize)]
struct SubmitResponse {
    url: String,
    view: SessionView,
}

async fn lookup(state: &AppState, id: &Uuid) -> Result<Arc<IntakeSession>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("intake session {id} not found")))
}

async fn open_session(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let Some((id, session)) = state.sessions.open(state.site.submit_delay).await else {
        tracing::warn!("intake session registry full, refusing new session");
        return Err(AppError::Unavailable(
            "too many open intake sessions, try again later".to_owned(),
        ));
    };
    tracing::debug!(session = %id, "intake session opened");
    Ok((
        StatusCode::CREATED,
        Json(OpenSessionResponse {
            id,
            view: session.view().await,
        }),
    ))
}

async fn read_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, &id).await?;
    Ok(Json(session.view().await))
}

async fn update_input(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<InputRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, &id).await?;
    session.set_input(body.input).await?;
    Ok(Json(session.view().await))
}

async fn submit_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    body: Option<Json<SubmitRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let session = lookup(&state, &id).await?;
    let url = match body {
        Some(Json(SubmitRequest { input })) => session.submit_input(input).await?,
        None => session.submit().await?,
    };
    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            url: url.to_string(),
            view: session.view().await,
        }),
    ))
}

async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(&id).await {
        tracing::debug!(session = %id, "intake session closed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("intake session {id} not found")))
    }
}
