//! REST handlers.
//!
//! Score service calls hit the store synchronously, so they run on the
//! blocking pool rather than on the async workers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};
use podium_primitives::{RankedEntry, ScoreboardSnapshot, UserId};
use podium_service::{ScoreService, ScoreUpdate, ServiceError};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::{ApiError, AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
pub(crate) struct UpdateResponse {
    message: &'static str,
    #[serde(flatten)]
    update: ScoreUpdate,
}

/// `POST /api/scores/update`
pub(crate) async fn update_score(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    body: Bytes,
) -> Result<Json<UpdateResponse>, ApiError> {
    // An empty body reads as a request without an increment.
    let body: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|_| ApiError::MalformedBody)?
    };

    let update = with_service(&state, move |service| {
        service.apply_increment(&identity, body.get("increment"))
    })
    .await?;

    Ok(Json(UpdateResponse {
        message: "Score updated successfully",
        update,
    }))
}

/// `GET /api/scoreboard/top`
pub(crate) async fn top_scores(
    State(state): State<AppState>,
) -> Result<Json<ScoreboardSnapshot>, ApiError> {
    Ok(Json(with_service(&state, ScoreService::top_scores).await?))
}

/// `GET /api/scoreboard/user/:user_id`
pub(crate) async fn user_score(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RankedEntry>, ApiError> {
    let user = UserId::new(user_id);
    Ok(Json(
        with_service(&state, move |service| service.user_score(&user)).await?,
    ))
}

/// Run a score service call on the blocking pool.
async fn with_service<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&ScoreService) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|err| {
            error!(error = %err, "Score service task failed");
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub(crate) async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::RouteNotFound)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
