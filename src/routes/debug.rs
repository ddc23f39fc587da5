use axum::{extract::State, response::Json};
use crate::config::APP_ENV_VAR;
use crate::models::EnvDiagnostics;
use crate::state::AppState;

// GET /api/debug/env - Compare the live environment flag with the one seen at startup
pub async fn env_snapshot(State(state): State<AppState>) -> Json<EnvDiagnostics> {
    let secret = if state.config.auth_secret.is_some() { "Set" } else { "Not Set" };

    Json(EnvDiagnostics {
        app_env: std::env::var(APP_ENV_VAR).ok(),
        auth_app_env: state.sessions.captured_env().map(str::to_string),
        auth_url: state.config.auth_url.clone(),
        auth_secret: secret.to_string(),
    })
}
