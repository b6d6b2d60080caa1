//! Shared forum endpoints. Posts live in memory only.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::routes::{require_user, AppError};
use crate::state::{AppState, ForumPost};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forum", get(list_posts))
        .route("/forum", post(create_post))
}

/// GET /forum - All posts, oldest first
async fn list_posts(State(state): State<AppState>) -> Json<Vec<ForumPost>> {
    Json(state.forum_posts())
}

#[derive(Deserialize)]
pub struct PostRequest {
    pub body: String,
}

/// POST /forum - Publish a post as the session user
async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PostRequest>,
) -> Result<Json<ForumPost>, AppError> {
    let user = require_user(&state, &headers)?;

    let body = req.body.trim().to_string();
    if body.is_empty() {
        return Err(AppError::bad_request("La publicación no puede estar vacía."));
    }

    Ok(Json(state.add_forum_post(&user, &body)))
}
