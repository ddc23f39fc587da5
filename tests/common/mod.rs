#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

use volley_league::config::AppConfig;
use volley_league::session::{JwtSessionProvider, SessionUser};
use volley_league::state::AppState;
use volley_league::{build_router, db};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestContext {
    pub app: Router,
    pub sessions: Arc<JwtSessionProvider>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_env(&[("AUTH_SECRET", TEST_SECRET), ("AUTH_URL", "http://localhost:3000")]).await
    }

    pub async fn with_env(pairs: &[(&str, &str)]) -> TestContext {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = AppConfig::from_lookup(|key| vars.get(key).cloned())
            .expect("Failed to build test config");

        let pool = db::connect_in_memory().await.expect("Failed to open in-memory database");
        db::migrate(&pool).await.expect("Failed to run migrations");

        let sessions = Arc::new(JwtSessionProvider::new(
            config.auth_secret.as_deref(),
            config.session_cookie.clone(),
            Some("test".to_string()),
        ));

        let app = build_router(AppState::new(pool, sessions.clone(), config));

        TestContext { app, sessions }
    }

    pub fn token_for(&self, user: &SessionUser) -> String {
        self.sessions
            .issue(user, chrono::Duration::hours(1))
            .expect("Failed to issue session token")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, bytes.to_vec())
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(request).await;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(request(Method::GET, uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send_json(request).await
    }
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn sample_user() -> SessionUser {
    SessionUser {
        id: "user-42".to_string(),
        name: Some("Test Spielerin".to_string()),
        email: Some("spielerin@example.com".to_string()),
        image: Some("https://example.com/avatar.png".to_string()),
    }
}
