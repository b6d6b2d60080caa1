//! Wellbeing survey endpoint.

use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use anima_core::SurveyResponse;

use crate::routes::{require_user, session_token, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/survey", post(submit))
}

#[derive(Deserialize)]
pub struct SurveyRequest {
    pub energy: u8,
    pub mood: u8,
    pub concentration: u8,
    pub motivation: u8,
}

#[derive(Serialize)]
pub struct SurveySummary {
    pub mean: f64,
}

/// POST /survey - Record the session's survey and return the mean.
/// The result stays on the session; nothing is written to disk.
async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SurveyRequest>,
) -> Result<Json<SurveySummary>, AppError> {
    require_user(&state, &headers)?;

    let response = SurveyResponse::new(req.energy, req.mood, req.concentration, req.motivation)?;

    let token = session_token(&headers)?;
    state
        .with_session(&token, |s| s.survey = Some(response))
        .ok_or_else(AppError::unauthorized)?;

    Ok(Json(SurveySummary {
        mean: response.mean(),
    }))
}
