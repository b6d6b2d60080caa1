//! Month grid construction for the calendar view.
//!
//! The grid is Monday-first, 7 columns, one row per calendar week that
//! overlaps the month. Cells outside the month carry day number 0 — the
//! designated "not a real day" sentinel — so the first and last weeks are
//! padded with blanks instead of out-of-month dates.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{AnimaError, AnimaResult};
use crate::event::Event;

/// How many event titles a day cell shows before collapsing into "+N más".
pub const MAX_TITLES_PER_CELL: usize = 2;

/// Titles longer than this are cut at a character boundary.
pub const TITLE_MAX_CHARS: usize = 18;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    /// Day of month, or 0 for padding cells outside the month
    pub day: u32,

    /// Up to `MAX_TITLES_PER_CELL` truncated event titles, in list order
    pub titles: Vec<String>,

    /// Events on this date beyond the titles shown
    pub overflow: usize,
}

impl DayCell {
    fn blank() -> Self {
        DayCell {
            day: 0,
            titles: Vec::new(),
            overflow: 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.day == 0
    }

    /// The "+N más" marker, when this cell has more events than it shows.
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} más", self.overflow))
    }
}

/// A rendered month: 7-column weeks covering every day of (year, month).
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

impl MonthGrid {
    /// Build the grid for (year, month), placing each event in the cell
    /// matching its date. Events outside the month are ignored.
    pub fn build(events: &[Event], year: i32, month: u32) -> AnimaResult<MonthGrid> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            AnimaError::InvalidInput(format!("Mes inválido: {}-{:02}", year, month))
        })?;

        let days = days_in_month(year, month);
        let lead = first.weekday().num_days_from_monday() as usize;

        // Bucket titles by day of month, preserving list order
        let mut per_day: Vec<Vec<&Event>> = vec![Vec::new(); days as usize + 1];
        for event in events {
            if event.date.year() == year && event.date.month() == month {
                per_day[event.date.day() as usize].push(event);
            }
        }

        let total_cells = (lead + days as usize).div_ceil(7) * 7;
        let mut weeks = Vec::with_capacity(total_cells / 7);
        let mut week: Vec<DayCell> = Vec::with_capacity(7);

        for slot in 0..total_cells {
            let cell = if slot < lead || slot >= lead + days as usize {
                DayCell::blank()
            } else {
                let day = (slot - lead + 1) as u32;
                let on_day = &per_day[day as usize];
                DayCell {
                    day,
                    titles: on_day
                        .iter()
                        .take(MAX_TITLES_PER_CELL)
                        .map(|e| truncate_title(&e.title))
                        .collect(),
                    overflow: on_day.len().saturating_sub(MAX_TITLES_PER_CELL),
                }
            };

            week.push(cell);
            if week.len() == 7 {
                weeks.push(std::mem::take(&mut week));
            }
        }

        Ok(MonthGrid { year, month, weeks })
    }

    /// Total cell count (always a multiple of 7).
    pub fn cell_count(&self) -> usize {
        self.weeks.iter().map(|w| w.len()).sum()
    }
}

/// A (year, month) position with ±1 navigation carrying at year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Self {
        MonthCursor { year, month }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            MonthCursor::new(self.year - 1, 12)
        } else {
            MonthCursor::new(self.year, self.month - 1)
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthCursor::new(self.year + 1, 1)
        } else {
            MonthCursor::new(self.year, self.month + 1)
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("validated by caller");
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month always exists");

    next_first.signed_duration_since(first).num_days() as u32
}

/// Cut a title at `TITLE_MAX_CHARS` characters, never inside a code point.
fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_MAX_CHARS {
        title.to_string()
    } else {
        title.chars().take(TITLE_MAX_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_cell_count_is_weeks_times_seven() {
        // (year, month, expected weeks overlapping the month)
        let cases = [
            (2025, 6, 6),  // Jun 2025 starts on a Sunday: 6 leading blanks
            (2021, 2, 4),  // Feb 2021 starts on a Monday and has 28 days
            (2025, 9, 5),  // Sep 2025 starts on a Monday, 30 days
            (2024, 2, 5),  // leap February
            (2025, 12, 5),
        ];

        for (year, month, weeks) in cases {
            let grid = MonthGrid::build(&[], year, month).unwrap();
            assert_eq!(grid.weeks.len(), weeks, "{}-{:02}", year, month);
            assert_eq!(grid.cell_count(), weeks * 7);
            assert!(grid.weeks.iter().all(|w| w.len() == 7));
        }
    }

    #[test]
    fn test_leading_and_trailing_cells_are_blank() {
        // Jun 1, 2025 is a Sunday, so Monday..Saturday of the first week are padding
        let grid = MonthGrid::build(&[], 2025, 6).unwrap();

        let first_week = &grid.weeks[0];
        assert!(first_week[..6].iter().all(|c| c.is_blank()));
        assert_eq!(first_week[6].day, 1);

        let last_week = grid.weeks.last().unwrap();
        assert_eq!(last_week[0].day, 30);
        assert!(last_week[1..].iter().all(|c| c.is_blank()));
    }

    #[test]
    fn test_events_land_only_in_their_own_cell() {
        let events = vec![
            make_event("Certamen", (2025, 6, 1)),
            make_event("Entrega", (2025, 6, 15)),
        ];
        let grid = MonthGrid::build(&events, 2025, 6).unwrap();

        for week in &grid.weeks {
            for cell in week {
                match cell.day {
                    1 => assert_eq!(cell.titles, vec!["Certamen"]),
                    15 => assert_eq!(cell.titles, vec!["Entrega"]),
                    _ => assert!(cell.titles.is_empty(), "day {}", cell.day),
                }
            }
        }
    }

    #[test]
    fn test_events_outside_the_month_are_ignored() {
        let events = vec![
            make_event("Mayo", (2025, 5, 31)),
            make_event("Julio", (2025, 7, 1)),
            make_event("Otro año", (2024, 6, 10)),
        ];
        let grid = MonthGrid::build(&events, 2025, 6).unwrap();
        assert!(grid
            .weeks
            .iter()
            .flatten()
            .all(|cell| cell.titles.is_empty()));
    }

    #[test]
    fn test_cell_shows_two_titles_and_overflow() {
        let events = vec![
            make_event("Prueba de física", (2025, 6, 10)),
            make_event("Entrega de ensayo", (2025, 6, 10)),
            make_event("Control de lectura", (2025, 6, 10)),
            make_event("Reunión de grupo", (2025, 6, 10)),
        ];
        let grid = MonthGrid::build(&events, 2025, 6).unwrap();

        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.day == 10)
            .unwrap();
        assert_eq!(cell.titles.len(), 2);
        assert_eq!(cell.overflow, 2);
        assert_eq!(cell.overflow_label().unwrap(), "+2 más");
    }

    #[test]
    fn test_titles_truncate_at_char_boundary() {
        let events = vec![make_event(
            "Presentación final de taller de título",
            (2025, 6, 10),
        )];
        let grid = MonthGrid::build(&events, 2025, 6).unwrap();

        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.day == 10)
            .unwrap();
        assert_eq!(cell.titles[0].chars().count(), TITLE_MAX_CHARS);
        assert_eq!(cell.titles[0], "Presentación final");
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert!(MonthGrid::build(&[], 2025, 13).is_err());
        assert!(MonthGrid::build(&[], 2025, 0).is_err());
    }

    #[test]
    fn test_cursor_carries_at_year_boundaries() {
        assert_eq!(MonthCursor::new(2025, 1).prev(), MonthCursor::new(2024, 12));
        assert_eq!(MonthCursor::new(2025, 12).next(), MonthCursor::new(2026, 1));
        assert_eq!(MonthCursor::new(2025, 6).prev(), MonthCursor::new(2025, 5));
        assert_eq!(MonthCursor::new(2025, 6).next(), MonthCursor::new(2025, 7));
    }
}
