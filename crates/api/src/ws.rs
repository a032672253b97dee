//! `/ws/scoreboard` observer endpoint.

use std::sync::Arc;

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use podium_broadcast::Broadcaster;
use tracing::{debug, warn};

use crate::AppState;

pub(crate) async fn scoreboard_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| serve_observer(socket, state.broadcaster))
}

/// Forward scoreboard messages until either side goes away.
///
/// Inbound frames other than close are ignored. The subscription is dropped
/// on every exit path, which removes it from the registry.
async fn serve_observer(mut socket: WebSocket, broadcaster: Arc<Broadcaster>) {
    let mut subscription = match broadcaster.subscribe().await {
        Ok(subscription) => subscription,
        Err(error) => {
            warn!(%error, "Failed to subscribe scoreboard observer");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };
    let id = subscription.id();
    debug!(%id, "Scoreboard observer connected");

    loop {
        tokio::select! {
            payload = subscription.recv() => {
                // None: dropped by the broadcaster after a failed send
                let Some(payload) = payload else { break };
                if socket.send(Message::Text(payload.to_string())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!(%id, "Scoreboard observer disconnected");
}
