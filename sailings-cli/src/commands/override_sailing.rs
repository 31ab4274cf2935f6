use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use sailings_core::date::parse_display_date;
use sailings_core::{Draft, EntryRecord, MonthKey, Money, ScheduleError};

use crate::render::Render;

/// Fields to change on the sailing; unset fields keep their value.
pub struct Changes {
    pub double_price: Option<String>,
    pub single_supplement: Option<String>,
    pub notes: Option<String>,
    pub itinerary: Option<String>,
    pub sort_order: Option<i32>,
    pub inactive: bool,
}

impl Changes {
    fn apply(self, draft: &mut Draft) -> Result<()> {
        if let Some(price) = self.double_price {
            draft.entry.double_price = price.parse::<Money>()?;
        }
        if let Some(price) = self.single_supplement {
            draft.entry.single_supplement = price.parse::<Money>()?;
        }
        if let Some(notes) = self.notes {
            draft.entry.notes = notes;
        }
        if let Some(itinerary) = self.itinerary {
            draft.entry.detailed_itinerary = itinerary;
        }
        if let Some(sort_order) = self.sort_order {
            draft.entry.sort_order = sort_order;
        }
        if self.inactive {
            draft.entry.is_active = false;
        }
        Ok(())
    }
}

pub async fn run(date: &str, nights: Option<u32>, changes: Changes) -> Result<()> {
    let start = parse_display_date(date)?;
    let mut board = super::open_board()?;
    board.open(MonthKey::of(start)).await;

    let candidates: Vec<_> = board
        .entries()
        .iter()
        .filter(|e| e.start == start && nights.is_none_or(|n| e.nights == n))
        .collect();

    let mut draft = match candidates.as_slice() {
        [] => bail!("No sailing departs on {date}"),
        [entry] => Draft::of(entry),
        _ => bail!(
            "{} sailings depart on {date}; pick one with --nights",
            candidates.len()
        ),
    };
    changes.apply(&mut draft)?;

    match board.save(draft).await {
        Ok(saved) => {
            println!("{} {}", "Saved".green(), saved.render());
            Ok(())
        }
        Err(ScheduleError::SaveConflict { draft, reason }) => {
            // hand the edit back so it can be retried
            let record = EntryRecord::from(&draft.entry);
            eprintln!("{}", serde_json::to_string_pretty(&record)?);
            bail!("Could not save sailing on {}: {reason}", draft.entry.start_text())
        }
        Err(e) => Err(e.into()),
    }
}
