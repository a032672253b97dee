mod common;

use axum::http::{StatusCode, header};
use common::{ALICE_TOKEN, BOB_TOKEN, app, app_with_metrics, get_request, json_body, update_request};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_update_requires_token() {
    let app = app();

    let response = app
        .router
        .oneshot(update_request(None, r#"{"increment": 10}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Authentication token required" })
    );
}

#[tokio::test]
async fn test_update_rejects_unknown_token() {
    let app = app();

    let response = app
        .router
        .oneshot(update_request(Some("forged"), r#"{"increment": 10}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Invalid or expired token" })
    );
}

#[tokio::test]
async fn test_update_applies_increment() {
    let app = app();

    let first = app
        .router
        .clone()
        .oneshot(update_request(Some(ALICE_TOKEN), r#"{"increment": 10}"#))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        json_body(first).await,
        json!({
            "message": "Score updated successfully",
            "userId": "alice",
            "previousScore": 0,
            "newScore": 10,
            "rank": 1,
        })
    );

    let second = app
        .router
        .oneshot(update_request(Some(ALICE_TOKEN), r#"{"increment": 15}"#))
        .await
        .unwrap();
    let body = json_body(second).await;
    assert_eq!(body["previousScore"], 10);
    assert_eq!(body["newScore"], 25);
}

#[tokio::test]
async fn test_update_validation_errors() {
    let app = app();

    let cases = [
        ("{}", "Increment value is required"),
        ("", "Increment value is required"),
        (r#"{"increment": null}"#, "Increment value is required"),
        (r#"{"increment": "ten"}"#, "Increment must be a number"),
        (r#"{"increment": 0}"#, "Increment must be a positive number"),
        (r#"{"increment": -4}"#, "Increment must be a positive number"),
        (r#"{"increment": 2.5}"#, "Increment must be a whole number"),
        (r#"{"increment": 1001}"#, "Increment cannot exceed 1000 per request"),
        ("{not json", "Request body must be valid JSON"),
    ];

    for (body, message) in cases {
        let response = app
            .router
            .clone()
            .oneshot(update_request(Some(ALICE_TOKEN), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json_body(response).await, json!({ "error": message }));
    }

    let top = app
        .router
        .oneshot(get_request("/api/scoreboard/top"))
        .await
        .unwrap();
    assert_eq!(json_body(top).await["totalPlayers"], 0);
}

#[tokio::test]
async fn test_top_scores_in_rank_order() {
    let app = app();

    for (token, increment) in [(ALICE_TOKEN, 50), (BOB_TOKEN, 80)] {
        let response = app
            .router
            .clone()
            .oneshot(update_request(
                Some(token),
                &json!({ "increment": increment }).to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .router
        .oneshot(get_request("/api/scoreboard/top"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["totalPlayers"], 2);
    assert_eq!(body["scores"][0]["userId"], "bob");
    assert_eq!(body["scores"][0]["username"], "Bob");
    assert_eq!(body["scores"][0]["rank"], 1);
    assert_eq!(body["scores"][1]["userId"], "alice");
    assert_eq!(body["scores"][1]["rank"], 2);
}

#[tokio::test]
async fn test_user_score_lookup() {
    let app = app();

    let missing = app
        .router
        .clone()
        .oneshot(get_request("/api/scoreboard/user/alice"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(missing).await,
        json!({ "error": "User score not found" })
    );

    app.router
        .clone()
        .oneshot(update_request(Some(ALICE_TOKEN), r#"{"increment": 7}"#))
        .await
        .unwrap();

    let found = app
        .router
        .oneshot(get_request("/api/scoreboard/user/alice"))
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);

    let body = json_body(found).await;
    assert_eq!(body["userId"], "alice");
    assert_eq!(body["username"], "Alice");
    assert_eq!(body["score"], 7);
    assert_eq!(body["rank"], 1);
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app = app();

    let response = app.router.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Server is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = app();

    let response = app
        .router
        .oneshot(get_request("/api/nothing-here"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let disabled = app();
    let response = disabled
        .router
        .oneshot(get_request("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let recorder = PrometheusBuilder::new().build_recorder();
    let enabled = app_with_metrics(Some(recorder.handle()));
    let response = enabled
        .router
        .oneshot(get_request("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
}
