#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use metrics_exporter_prometheus::PrometheusHandle;
use podium_api::{AppState, TokenTable, router};
use podium_broadcast::{BroadcastConfig, Broadcaster, SubscriberRegistry};
use podium_primitives::Identity;
use podium_rank::RankEngine;
use podium_service::{ScoreService, ServiceConfig};
use podium_storage::MemoryStore;
use serde_json::Value;
use tokio::task::JoinHandle;

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub worker: JoinHandle<()>,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

pub fn app() -> TestApp {
    app_with_metrics(None)
}

pub fn app_with_metrics(metrics: Option<PrometheusHandle>) -> TestApp {
    init_tracing();

    let store = Arc::new(MemoryStore::new());
    let ranks = Arc::new(RankEngine::new(store.clone(), store.clone()));

    let broadcaster = Arc::new(Broadcaster::new(
        Arc::new(SubscriberRegistry::new()),
        ranks.clone(),
        BroadcastConfig::default(),
    ));
    let (trigger, worker) = broadcaster.spawn_worker();

    let service = Arc::new(ScoreService::new(
        store,
        ranks,
        Arc::new(trigger),
        ServiceConfig::default(),
    ));

    let mut tokens = TokenTable::new();
    tokens.insert(ALICE_TOKEN, Identity::new("alice", "Alice"));
    tokens.insert(BOB_TOKEN, Identity::new("bob", "Bob"));

    let state = AppState {
        service,
        broadcaster,
        auth: Arc::new(tokens),
        metrics,
    };

    TestApp {
        router: router(state.clone()),
        state,
        worker,
    }
}

pub fn update_request(token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post("/api/scores/update").header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
