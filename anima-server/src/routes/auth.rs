//! Login endpoints.
//!
//! Only institutional addresses are accepted; a session token is issued on
//! success and identifies the student on every other endpoint.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::routes::{AppError, SESSION_HEADER};
use crate::state::AppState;

const ALLOWED_DOMAIN: &str = "@udd.cl";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: String,
}

/// POST /auth/login - Exchange an institutional email for a session token
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    if !email.ends_with(ALLOWED_DOMAIN) {
        return Err(AppError::bad_request(
            "Solo se permiten correos institucionales UDD.",
        ));
    }

    let token = state.open_session(&email);

    Ok(Json(LoginResponse { token, user: email }))
}

/// POST /auth/logout - Drop the session
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(token) = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) {
        state.close_session(token);
    }

    Json(serde_json::json!({ "ok": true }))
}
