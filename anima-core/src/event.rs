//! Calendar event and per-user profile types.
//!
//! These are the records persisted in each student's JSON document. Events
//! have no id of their own: a student addresses an event by its position in
//! the owning list, so create/edit/delete all work on indexes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AnimaError, AnimaResult};

/// A single calendar entry belonging to one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,

    /// Calendar date the entry falls on
    pub date: NaiveDate,

    /// Free-form time of day, e.g. "10:30" (not validated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display tag used by the frontend to color the entry
    #[serde(default = "default_color")]
    pub color: String,
}

/// Per-student display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default = "default_color")]
    pub default_color: String,

    #[serde(default = "default_view_mode")]
    pub view_mode: String,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            default_color: default_color(),
            view_mode: default_view_mode(),
        }
    }
}

fn default_color() -> String {
    "azul".to_string()
}

fn default_view_mode() -> String {
    "mes".to_string()
}

/// Everything stored for one student: the event list plus preferences.
///
/// Older documents may miss either field (or be a bare event array, see
/// `ProfileStore::load`), so both fields default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub events: Vec<Event>,

    #[serde(default)]
    pub prefs: Prefs,
}

/// Unvalidated event input as it arrives from a form or the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl EventDraft {
    /// Validate the draft into an `Event`, falling back to the student's
    /// default color when none was picked.
    ///
    /// Rejects empty titles and malformed dates with an inline message; a
    /// rejected draft must not be saved in any form.
    pub fn into_event(self, prefs: &Prefs) -> AnimaResult<Event> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AnimaError::InvalidInput(
                "El evento necesita un título".to_string(),
            ));
        }

        let date = parse_event_date(&self.date)?;

        let time = self
            .time
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Event {
            title,
            date,
            time,
            description,
            color: self.color.unwrap_or_else(|| prefs.default_color.clone()),
        })
    }
}

/// Parse YYYY-MM-DD into a valid calendar date.
pub fn parse_event_date(s: &str) -> AnimaResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        AnimaError::InvalidInput(format!("Fecha inválida '{}'. Usa AAAA-MM-DD", s.trim()))
    })
}
