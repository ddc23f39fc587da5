use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::session::SessionError;

pub const UNAUTHENTICATED_MESSAGE: &str = "Nicht authentifiziert";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("rejected request body: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(sqlx::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::Unauthenticated => {
                (status, Json(json!({ "error": UNAUTHENTICATED_MESSAGE }))).into_response()
            }
            ApiError::MethodNotAllowed => {
                (status, Json(json!({ "message": METHOD_NOT_ALLOWED_MESSAGE }))).into_response()
            }
            ApiError::Rejected { message, .. }
            | ApiError::Validation(message)
            | ApiError::Conflict(message) => {
                let body = ErrorResponse { error: status.to_string(), message };
                (status, Json(body)).into_response()
            }
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database error");
                internal_error(status)
            }
            ApiError::Session(err) => {
                tracing::error!(error = %err, "session provider error");
                internal_error(status)
            }
        }
    }
}

fn internal_error(status: StatusCode) -> Response {
    let body = ErrorResponse {
        error: status.to_string(),
        message: "Internal server error".to_string(),
    };
    (status, Json(body)).into_response()
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        let is_unique = err
            .as_database_error()
            .map(|e| e.is_unique_violation())
            .unwrap_or(false);

        if is_unique {
            ApiError::Conflict("a team with this name already exists".to_string())
        } else {
            ApiError::Database(err)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
