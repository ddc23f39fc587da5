use axum::{extract::State, response::Json, http::StatusCode};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::models::HealthResponse;

pub async fn health_check(State(pool): State<SqlitePool>) -> (StatusCode, Json<HealthResponse>) {
    let database = match db::ping(&pool).await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, "health check could not reach the database");
            "unavailable"
        }
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    (StatusCode::OK, Json(response))
}
