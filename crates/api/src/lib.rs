//! HTTP and WebSocket transport for the leaderboard.
//!
//! | Route                            | Description                          |
//! |----------------------------------|--------------------------------------|
//! | `POST /api/scores/update`        | apply an increment (bearer token)    |
//! | `GET /api/scoreboard/top`        | top-K scores and total player count  |
//! | `GET /api/scoreboard/user/:id`   | one user's score and rank            |
//! | `GET /ws/scoreboard`             | live scoreboard over WebSocket       |
//! | `GET /health`                    | liveness                             |
//! | `GET /metrics`                   | Prometheus metrics, when enabled     |

mod auth;
mod error;
mod handlers;
mod server;
mod state;
mod ws;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use auth::{AuthenticatedUser, Authenticator, TokenTable};
pub use error::ApiError;
pub use server::{HttpServer, HttpServerConfig};
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scores/update", post(handlers::update_score))
        .route("/api/scoreboard/top", get(handlers::top_scores))
        .route("/api/scoreboard/user/:user_id", get(handlers::user_score))
        .route("/ws/scoreboard", get(ws::scoreboard_ws))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
