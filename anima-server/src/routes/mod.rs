pub mod auth;
pub mod calendar;
pub mod chat;
pub mod forum;
pub mod survey;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use anima_core::AnimaError;

use crate::state::AppState;

/// Header carrying the session token issued by /auth/login.
pub const SESSION_HEADER: &str = "x-anima-token";

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses. Invalid input maps to 400, a missing
/// session to 401, everything else to 500.
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!(message.into()),
        }
    }

    pub fn unauthorized() -> Self {
        AppError {
            status: StatusCode::UNAUTHORIZED,
            error: anyhow::anyhow!("Sesión no válida. Inicia sesión de nuevo."),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        let status = match error.downcast_ref::<AnimaError>() {
            Some(AnimaError::InvalidInput(_)) | Some(AnimaError::EventNotFound(_)) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        AppError { status, error }
    }
}

/// The raw session token header, or 401.
pub fn session_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(AppError::unauthorized)
}

/// Resolve the session token header to a user, or 401.
pub fn require_user(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    let token = session_token(headers)?;
    state.user_for(&token).ok_or_else(AppError::unauthorized)
}
