//! Terminal rendering for schedule types.

use owo_colors::OwoColorize;
use sailings_core::{MonthKey, ScheduleEntry};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for MonthKey {
    fn render(&self) -> String {
        format!("🚢 {}", self.to_string().bold())
    }
}

impl Render for ScheduleEntry {
    fn render(&self) -> String {
        let when = format!("{} → {}", self.start_text(), self.end_text());
        let nights = format!("{} {}", self.nights, pluralize("night", self.nights as usize));
        let prices = format!(
            "{} double, {} single",
            self.double_price, self.single_supplement
        );

        let mut line = if self.id.is_generated() {
            format!("{} {} {}", "·".dimmed(), when, nights.dimmed())
        } else {
            format!("{} {} {}", "●".green(), when, nights.dimmed())
        };
        line.push_str(&format!("  {}  {}", self.route(), prices.cyan()));

        if !self.is_active {
            line.push_str(&format!("  {}", "(inactive)".red()));
        }
        if !self.notes.is_empty() {
            line.push_str(&format!("\n     {}", self.notes.dimmed()));
        }
        line.push_str(&format!("\n     {}", self.id.to_string().dimmed()));
        line
    }
}

/// Render a month header followed by its sailings.
pub fn render_month(key: MonthKey, entries: &[ScheduleEntry]) -> String {
    let mut lines = vec![key.render()];

    if entries.is_empty() {
        lines.push(format!("   {}", "No upcoming sailings".dimmed()));
    } else {
        for entry in entries {
            lines.push(format!("   {}", entry.render()));
        }
        let stored = entries.iter().filter(|e| e.id.is_persisted()).count();
        lines.push(String::new());
        lines.push(
            format!(
                "{} {}, {} stored",
                entries.len(),
                pluralize("sailing", entries.len()),
                stored
            )
            .dimmed()
            .to_string(),
        );
    }

    lines.join("\n")
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
