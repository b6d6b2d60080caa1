//! Calendar and event endpoints.
//!
//! Every handler re-reads the user's JSON document from disk and rebuilds
//! the derived state (grid, recommendations) from scratch — there is no
//! cached view to invalidate.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;

use anima_core::{recommend, AnimaError, Event, EventDraft, MonthCursor, MonthGrid, Prefs};

use crate::routes::{require_user, session_token, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar/{year}/{month}", get(month_view))
        .route("/events", get(list_events))
        .route("/events", post(create_event))
        .route("/events/{index}", put(update_event))
        .route("/events/{index}", delete(delete_event))
        .route("/prefs", put(update_prefs))
}

/// The month view plus the advisory lines recomputed for it.
#[derive(Serialize)]
pub struct CalendarView {
    pub grid: MonthGrid,
    pub prev: MonthCursor,
    pub next: MonthCursor,
    pub recommendations: Vec<String>,
}

/// GET /calendar/:year/:month - Month grid and recommendations
async fn month_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<CalendarView>, AppError> {
    let user = require_user(&state, &headers)?;
    let token = session_token(&headers)?;

    let profile = state.store().load(&user);
    let grid = MonthGrid::build(&profile.events, year, month)?;

    let survey = state
        .with_session(&token, |s| s.survey)
        .ok_or_else(AppError::unauthorized)?;

    let today = Local::now().date_naive();
    let recommendations = recommend(
        &profile.events,
        survey.as_ref(),
        today,
        &state.advice_rules,
    );

    let cursor = MonthCursor::new(year, month);

    Ok(Json(CalendarView {
        grid,
        prev: cursor.prev(),
        next: cursor.next(),
        recommendations,
    }))
}

/// GET /events - The user's full event list, in stored order
async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Event>>, AppError> {
    let user = require_user(&state, &headers)?;
    Ok(Json(state.store().load(&user).events))
}

/// POST /events - Validate and append an event
async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, AppError> {
    let user = require_user(&state, &headers)?;
    let store = state.store();

    let mut profile = store.load(&user);
    let event = draft.into_event(&profile.prefs)?;

    profile.events.push(event.clone());
    store.save(&user, &profile)?;

    Ok(Json(event))
}

/// PUT /events/:index - Replace an event in place
async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(index): Path<usize>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, AppError> {
    let user = require_user(&state, &headers)?;
    let store = state.store();

    let mut profile = store.load(&user);
    if index >= profile.events.len() {
        return Err(AnimaError::EventNotFound(index).into());
    }

    let event = draft.into_event(&profile.prefs)?;
    profile.events[index] = event.clone();
    store.save(&user, &profile)?;

    Ok(Json(event))
}

/// DELETE /events/:index - Remove an event by position
async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(index): Path<usize>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = require_user(&state, &headers)?;
    let store = state.store();

    let mut profile = store.load(&user);
    if index >= profile.events.len() {
        return Err(AnimaError::EventNotFound(index).into());
    }

    profile.events.remove(index);
    store.save(&user, &profile)?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// PUT /prefs - Persist display preferences with the profile
async fn update_prefs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(prefs): Json<Prefs>,
) -> Result<Json<Prefs>, AppError> {
    let user = require_user(&state, &headers)?;
    let store = state.store();

    let mut profile = store.load(&user);
    profile.prefs = prefs.clone();
    store.save(&user, &profile)?;

    Ok(Json(prefs))
}
