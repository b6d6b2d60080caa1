//! Chat endpoints.
//!
//! One outbound completion per message; the message is screened and the
//! exchange appended to the session history. The provider never surfaces
//! raw errors here — `ChatClient::reply` already degrades to its fixed
//! fallback string.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use anima_core::{screen, ChatTurn, Referral};

use crate::routes::{require_user, session_token, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(send_message))
        .route("/chat/history", get(history))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral: Option<Referral>,
}

/// POST /chat - Answer one student message
async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let user = require_user(&state, &headers)?;

    let message = req.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::bad_request(
            "Por favor escribe algo antes de enviar.",
        ));
    }

    let token = session_token(&headers)?;

    // Snapshot the history outside the lock; the completion call can take
    // seconds and must not hold other sessions up.
    let history = state
        .with_session(&token, |s| s.history.clone())
        .ok_or_else(AppError::unauthorized)?;

    let reply = state.chat.reply(&history, &message).await;
    let referral = screen(&message, &state.screening_rules);

    state.with_session(&token, |s| {
        s.history.push(ChatTurn {
            at: Utc::now(),
            user: user.clone(),
            message: message.clone(),
            reply: reply.clone(),
        });
    });

    Ok(Json(ChatResponse {
        flagged: referral.is_some(),
        referral,
        reply,
    }))
}

/// GET /chat/history - The session's conversation so far
async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ChatTurn>>, AppError> {
    require_user(&state, &headers)?;
    let token = session_token(&headers)?;

    let turns = state
        .with_session(&token, |s| s.history.clone())
        .ok_or_else(AppError::unauthorized)?;

    Ok(Json(turns))
}
