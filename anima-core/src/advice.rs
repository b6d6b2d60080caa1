//! Recommendation engine for the calendar view.
//!
//! A pure scan over the student's events and (optional) survey result. Every
//! rule is applied independently and the matching rules' lines are
//! concatenated in a fixed display order: per-event reminders, then the
//! overload warning, then the survey advisory, then the exam advisory. The
//! engine holds no state and is re-run from scratch on every view load.
//!
//! The trigger vocabulary and advisory texts are plain data on
//! `AdviceRules` so they can be tuned without touching the scan itself.

use chrono::NaiveDate;

use crate::event::Event;
use crate::survey::SurveyResponse;

/// Tunable thresholds and texts for `recommend`.
#[derive(Debug, Clone)]
pub struct AdviceRules {
    /// Days ahead (inclusive) that produce per-event reminders
    pub reminder_days: i64,

    /// Days ahead (inclusive) scanned for overloaded dates
    pub overload_days: i64,

    /// Events on one date that count as an overload
    pub overload_threshold: usize,

    /// Survey mean below this emits the low-energy advisory
    pub low_energy_threshold: f64,

    /// Title substrings (lowercase) that mark an event as an evaluation
    pub exam_triggers: Vec<String>,

    pub overload_text: String,
    pub low_energy_text: String,
    pub exam_text: String,
}

impl Default for AdviceRules {
    fn default() -> Self {
        AdviceRules {
            reminder_days: 3,
            overload_days: 7,
            overload_threshold: 3,
            low_energy_threshold: 4.0,
            exam_triggers: ["prueba", "certamen", "examen", "entrega", "control"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            overload_text: "Tienes varios compromisos el mismo día esta semana. \
                            Considera repartir la carga o pedir ayuda a tiempo."
                .to_string(),
            low_energy_text: "Tu encuesta de hoy muestra poca energía. \
                              Agenda pausas y prioriza lo importante."
                .to_string(),
            exam_text: "Se acercan evaluaciones: arma un plan de estudio con tiempo."
                .to_string(),
        }
    }
}

/// Scan events and the survey summary, emitting advisory lines in display
/// order. Stateless and idempotent: identical inputs give identical output.
pub fn recommend(
    events: &[Event],
    survey: Option<&SurveyResponse>,
    today: NaiveDate,
    rules: &AdviceRules,
) -> Vec<String> {
    let mut lines = Vec::new();

    // 1. Per-event reminders within the short window
    for event in events {
        let delta = (event.date - today).num_days();
        if (0..=rules.reminder_days).contains(&delta) {
            if delta == 0 {
                lines.push(format!("Recordatorio: \"{}\" es hoy", event.title));
            } else {
                lines.push(format!(
                    "Recordatorio: \"{}\" es en {} día(s)",
                    event.title, delta
                ));
            }
        }
    }

    // 2. One warning if any upcoming date is overloaded, however many qualify
    let overloaded = (0..=rules.overload_days)
        .map(|offset| today + chrono::Duration::days(offset))
        .any(|date| {
            events.iter().filter(|e| e.date == date).count() >= rules.overload_threshold
        });
    if overloaded {
        lines.push(rules.overload_text.clone());
    }

    // 3. Low survey mean
    if let Some(survey) = survey {
        if survey.mean() < rules.low_energy_threshold {
            lines.push(rules.low_energy_text.clone());
        }
    }

    // 4. One advisory if any title mentions any evaluation trigger
    let has_exam = events.iter().any(|event| {
        let title = event.title.to_lowercase();
        rules.exam_triggers.iter().any(|t| title.contains(t))
    });
    if has_exam {
        lines.push(rules.exam_text.clone());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(title: &str, date: NaiveDate) -> Event {
        Event {
            title: title.to_string(),
            date,
            time: None,
            description: None,
            color: "azul".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn days(n: i64) -> NaiveDate {
        today() + chrono::Duration::days(n)
    }

    #[test]
    fn test_no_events_no_survey_is_empty() {
        assert!(recommend(&[], None, today(), &AdviceRules::default()).is_empty());
    }

    #[test]
    fn test_reminder_wording_today_vs_in_days() {
        let events = vec![
            make_event("Taller", days(0)),
            make_event("Ayudantía", days(3)),
            make_event("Lejano", days(4)),
        ];
        let lines = recommend(&events, None, today(), &AdviceRules::default());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Recordatorio: \"Taller\" es hoy");
        assert_eq!(lines[1], "Recordatorio: \"Ayudantía\" es en 3 día(s)");
    }

    #[test]
    fn test_past_events_produce_no_reminder() {
        let events = vec![make_event("Ayer", days(-1))];
        assert!(recommend(&events, None, today(), &AdviceRules::default()).is_empty());
    }

    #[test]
    fn test_overload_emits_single_warning() {
        // Four events on one date inside the week: one warning, not four
        let events = vec![
            make_event("A", days(5)),
            make_event("B", days(5)),
            make_event("C", days(5)),
            make_event("D", days(5)),
        ];
        let rules = AdviceRules::default();
        let lines = recommend(&events, None, today(), &rules);

        assert_eq!(
            lines.iter().filter(|l| **l == rules.overload_text).count(),
            1
        );
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_overload_ignores_dates_past_the_window() {
        let events = vec![
            make_event("A", days(8)),
            make_event("B", days(8)),
            make_event("C", days(8)),
        ];
        let lines = recommend(&events, None, today(), &AdviceRules::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_low_energy_advisory_follows_mean() {
        let rules = AdviceRules::default();

        let low = SurveyResponse::new(3, 4, 3, 4).unwrap();
        assert_eq!(low.mean(), 3.5);
        let lines = recommend(&[], Some(&low), today(), &rules);
        assert!(lines.contains(&rules.low_energy_text));

        let fine = SurveyResponse::new(8, 8, 8, 8).unwrap();
        let lines = recommend(&[], Some(&fine), today(), &rules);
        assert!(!lines.contains(&rules.low_energy_text));
    }

    #[test]
    fn test_exam_advisory_is_single_and_case_insensitive() {
        let events = vec![
            make_event("CERTAMEN de química", days(20)),
            make_event("Entrega de informe", days(25)),
        ];
        let rules = AdviceRules::default();
        let lines = recommend(&events, None, today(), &rules);

        // Two matching titles still produce one advisory
        assert_eq!(lines, vec![rules.exam_text.clone()]);
    }

    #[test]
    fn test_lines_keep_display_order() {
        let rules = AdviceRules::default();
        let events = vec![
            make_event("Prueba de cálculo", days(1)),
            make_event("A", days(2)),
            make_event("B", days(2)),
            make_event("C", days(2)),
        ];
        let survey = SurveyResponse::new(2, 2, 2, 2).unwrap();
        let lines = recommend(&events, Some(&survey), today(), &rules);

        assert_eq!(lines.len(), 7);
        assert!(lines[..4].iter().all(|l| l.starts_with("Recordatorio")));
        assert_eq!(lines[4], rules.overload_text);
        assert_eq!(lines[5], rules.low_energy_text);
        assert_eq!(lines[6], rules.exam_text);
    }
}
