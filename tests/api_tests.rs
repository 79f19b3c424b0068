use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use botdeck::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Default API key seeded by migration (must match m20250612_add_users.rs)
const DEFAULT_API_KEY: &str = "botdeck_default_api_key_please_regenerate";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // One connection keeps the in-memory database shared across requests.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.server.secure_cookies = false;
    config.assistant.enabled = false;

    let state = botdeck::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    botdeck::api::router(state).await
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-Api-Key", DEFAULT_API_KEY)
        .body(Body::empty())
        .unwrap()
}

fn authed_json(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Api-Key", DEFAULT_API_KEY)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_auth_endpoints() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/system/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/system/status")
                .header("X-Api-Key", "wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(authed_get("/api/system/status"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_returns_api_key() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"username": "admin", "password": "password"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["api_key"], DEFAULT_API_KEY);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"username": "admin", "password": "nope"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bot_and_command_crud() {
    let app = spawn_app().await;

    let new_bot = serde_json::json!({
        "token": "secret-token",
        "prefix": "!",
        "name": "Integration Bot"
    });

    let response = app
        .clone()
        .oneshot(authed_json("POST", "/api/bots", &new_bot))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let bot_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "offline");

    let response = app.clone().oneshot(authed_get("/api/bots")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let new_command = serde_json::json!({
        "name": "ping",
        "description": "Replies with pong",
        "response": "pong"
    });

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/api/bots/{bot_id}/commands"),
            &new_command,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let command_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["enabled"], true);

    let response = app
        .clone()
        .oneshot(authed_json(
            "PATCH",
            &format!("/api/commands/{command_id}"),
            &serde_json::json!({"enabled": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["enabled"], false);
    assert_eq!(body["data"]["name"], "ping");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/commands/{command_id}"))
                .header("X-Api-Key", DEFAULT_API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_get(&format!("/api/bots/{bot_id}/commands")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_analytics_over_http() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/bots",
            &serde_json::json!({"token": "t", "prefix": "!", "name": "Stats Bot"}),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    let bot_id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/api/bots/{bot_id}/analytics"),
            &serde_json::json!({"command_name": "ping", "response_time_ms": 50}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["usage_count"], 1);
    assert_eq!(body["data"]["avg_response_time"], 50);

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/api/bots/{bot_id}/analytics"),
            &serde_json::json!({"command_name": "ping", "response_time_ms": 150}),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["data"]["usage_count"], 2);
    assert_eq!(body["data"]["avg_response_time"], 100);

    let response = app
        .clone()
        .oneshot(authed_get(&format!("/api/bots/{bot_id}/analytics")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Unknown bots are a 404, not a silently created orphan row.
    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/bots/999999/analytics",
            &serde_json::json!({"command_name": "ping", "response_time_ms": 10}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/api/bots/{bot_id}/analytics"),
            &serde_json::json!({"command_name": "ping", "response_time_ms": -5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_feed_requires_auth() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/status/feed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_assistant_rejects_blank_prompt() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/assistant/generate",
            &serde_json::json!({"prompt": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
