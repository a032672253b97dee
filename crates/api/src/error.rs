//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use podium_primitives::ValidationError;
use podium_service::ServiceError;
use serde_json::json;
use tracing::error;

/// Errors surfaced to HTTP clients as `{"error": <message>}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Request body must be valid JSON")]
    MalformedBody,

    #[error("User score not found")]
    ScoreNotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::MalformedBody => StatusCode::BAD_REQUEST,
            Self::ScoreNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(err) => Self::Validation(err),
            ServiceError::NotFound(_) => Self::ScoreNotFound,
            ServiceError::Store(err) => {
                error!(error = %err, "Storage failure");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
