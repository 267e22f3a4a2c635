#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use storefront::{AppState, Backends, config::Config, create_app};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-jwt-secret";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        redis_url: None,
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiration_secs: 15 * 60,
        refresh_token_expiration_secs: 30 * 24 * 3600,
        admin_user_id: 1,
        bcrypt_cost: 4,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
    }
}

pub fn create_test_app() -> Router {
    let state = AppState::new(test_config(), Backends::in_memory()).expect("valid test key");
    create_app(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let authorization = token.map(|token| format!("Bearer {}", token));
    send_with_authorization(app, method, uri, authorization.as_deref(), body).await
}

/// 原样发送 Authorization 头
pub async fn send_with_authorization(
    app: &Router,
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn register(app: &Router, username: &str, password: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/register",
        None,
        Some(serde_json::json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

/// 返回 (access_token, refresh_token)
pub async fn login(app: &Router, username: &str, password: &str) -> (String, String) {
    let (status, json) = send(
        app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    (
        json["access_token"].as_str().unwrap().to_string(),
        json["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// 解码令牌载荷，用于断言声明内容
pub fn payload_of(token: &str) -> Value {
    use jsonwebtoken::{DecodingKey, Validation, decode};
    decode::<Value>(
        token,
        &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
        &Validation::default(),
    )
    .unwrap()
    .claims
}
