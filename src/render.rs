//! Terminal rendering for anima-core types.
//!
//! Colored month grid and advisory output using owo_colors.

use anima_core::month::MonthGrid;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[month as usize - 1],
        _ => "¿?",
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(
            format!("{} {}", month_name(self.month), self.year)
                .bold()
                .to_string(),
        );
        lines.push("lu ma mi ju vi sá do".dimmed().to_string());

        for week in &self.weeks {
            let row = week
                .iter()
                .map(|cell| {
                    if cell.is_blank() {
                        "  ".to_string()
                    } else if cell.titles.is_empty() {
                        format!("{:2}", cell.day)
                    } else {
                        format!("{:2}", cell.day).green().bold().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(row);
        }

        // Day detail below the grid
        for cell in self.weeks.iter().flatten().filter(|c| !c.titles.is_empty()) {
            let mut entry = format!("{:2} · {}", cell.day, cell.titles.join(", "));
            if let Some(label) = cell.overflow_label() {
                entry.push(' ');
                entry.push_str(&label.dimmed().to_string());
            }
            lines.push(entry);
        }

        lines.join("\n")
    }
}

/// Advisory lines as a bullet list, or a quiet placeholder.
pub fn render_advice(lines: &[String]) -> String {
    if lines.is_empty() {
        return "Sin recomendaciones por ahora.".dimmed().to_string();
    }

    lines
        .iter()
        .map(|l| format!("• {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "Enero");
        assert_eq!(month_name(12), "Diciembre");
    }
}
