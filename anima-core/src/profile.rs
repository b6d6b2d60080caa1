//! Per-user JSON document storage.
//!
//! One pretty-printed JSON file per student under the data directory, named
//! after the student's email. Reads are lenient: a missing file is an empty
//! profile, and a corrupt file degrades to an empty profile with a logged
//! warning so the rest of the app keeps working. Writes go through a temp
//! file + rename so a crash mid-write can't leave a half-written document.

use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{AnimaError, AnimaResult};
use crate::event::{Event, UserProfile};

#[derive(Clone)]
pub struct ProfileStore {
    data_dir: PathBuf,
}

impl ProfileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ProfileStore {
            data_dir: data_dir.into(),
        }
    }

    /// Filename key for a user identifier (email): lowercase, every run of
    /// non-alphanumeric characters collapsed to a single dash.
    pub fn key_for(user: &str) -> String {
        user.to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn path_for(&self, user: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", Self::key_for(user)))
    }

    /// Load a student's profile.
    ///
    /// Never fails: missing and unreadable files both come back as the
    /// default profile. Corrupt JSON is reported via `warn!` — data loss
    /// should be diagnosable from the logs even though the student isn't
    /// blocked by it.
    pub fn load(&self, user: &str) -> UserProfile {
        let path = self.path_for(user);

        if !path.exists() {
            return UserProfile::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return UserProfile::default();
            }
        };

        match parse_profile(&content) {
            Some(profile) => profile,
            None => {
                warn!(
                    "Corrupt profile at {}; treating as empty",
                    path.display()
                );
                UserProfile::default()
            }
        }
    }

    /// Persist a student's profile, overwriting the previous document.
    pub fn save(&self, user: &str, profile: &UserProfile) -> AnimaResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let path = self.path_for(user);
        let temp = path.with_extension("json.tmp");

        let content = serde_json::to_string_pretty(profile)
            .map_err(|e| AnimaError::Serialization(e.to_string()))?;

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Parse a stored document in either layout: the current
/// `{"events": [...], "prefs": {...}}` object, or the legacy bare event
/// array some earlier documents used.
fn parse_profile(content: &str) -> Option<UserProfile> {
    if let Ok(profile) = serde_json::from_str::<UserProfile>(content) {
        return Some(profile);
    }

    serde_json::from_str::<Vec<Event>>(content)
        .ok()
        .map(|events| UserProfile {
            events,
            ..UserProfile::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Prefs;
    use chrono::NaiveDate;

    fn make_event(title: &str, date: (i32, u32, u32)) -> Event {
        Event {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: None,
            description: None,
            color: "azul".to_string(),
        }
    }

    #[test]
    fn test_key_for_email() {
        assert_eq!(
            ProfileStore::key_for("Nombre.Apellido@udd.cl"),
            "nombre-apellido-udd-cl"
        );
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        let profile = UserProfile {
            events: vec![
                make_event("Certamen", (2025, 6, 1)),
                Event {
                    time: Some("10:30".to_string()),
                    description: Some("sala 204".to_string()),
                    ..make_event("Entrega", (2025, 6, 15))
                },
            ],
            prefs: Prefs {
                default_color: "rojo".to_string(),
                view_mode: "mes".to_string(),
            },
        };

        store.save("alumna@udd.cl", &profile).unwrap();
        assert_eq!(store.load("alumna@udd.cl"), profile);
    }

    #[test]
    fn test_save_then_load_round_trips_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        let profile = UserProfile::default();
        store.save("alumna@udd.cl", &profile).unwrap();
        assert_eq!(store.load("alumna@udd.cl"), profile);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        assert_eq!(store.load("nadie@udd.cl"), UserProfile::default());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        std::fs::write(store.path_for("alumna@udd.cl"), "{not json").unwrap();
        assert_eq!(store.load("alumna@udd.cl"), UserProfile::default());
    }

    #[test]
    fn test_legacy_bare_array_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        std::fs::write(
            store.path_for("alumna@udd.cl"),
            r#"[{"title": "Prueba", "date": "2025-06-01"}]"#,
        )
        .unwrap();

        let profile = store.load("alumna@udd.cl");
        assert_eq!(profile.events.len(), 1);
        assert_eq!(profile.events[0].title, "Prueba");
        assert_eq!(profile.prefs, Prefs::default());
    }
}
