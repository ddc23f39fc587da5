use axum::{extract::State, http::HeaderMap, response::Json};
use serde::Serialize;
use std::sync::Arc;
use crate::error::ApiError;
use crate::session::{SessionProvider, SessionUser};

#[derive(Serialize)]
pub struct UserResponse {
    user: SessionUser,
}

// GET /api/user - Identity of the current session
pub async fn current_user(
    State(sessions): State<Arc<dyn SessionProvider>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let user = sessions
        .session(&headers)?
        .and_then(|session| session.user)
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(UserResponse { user }))
}
