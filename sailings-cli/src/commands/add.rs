use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use sailings_core::date::parse_display_date;
use sailings_core::entry::end_date;
use sailings_core::{Draft, EntryId, MonthKey, Money, ScheduleEntry};

use crate::render::Render;

pub struct NewSailing {
    pub start: String,
    pub nights: u32,
    pub from: String,
    pub to: String,
    pub double_price: String,
    pub single_supplement: String,
    pub notes: Option<String>,
}

impl NewSailing {
    fn into_entry(self) -> Result<ScheduleEntry> {
        if self.nights == 0 {
            bail!("A sailing needs at least one night");
        }
        let start = parse_display_date(&self.start)?;
        let Some(end) = end_date(start, self.nights) else {
            bail!("{} nights after {} is out of range", self.nights, self.start);
        };

        Ok(ScheduleEntry {
            id: EntryId::Unsaved,
            start,
            end,
            nights: self.nights,
            start_point: self.from,
            end_point: self.to,
            double_price: self.double_price.parse::<Money>()?,
            single_supplement: self.single_supplement.parse::<Money>()?,
            detailed_itinerary: String::new(),
            notes: self.notes.unwrap_or_default(),
            is_active: true,
            sort_order: 0,
        })
    }
}

pub async fn run(sailing: NewSailing) -> Result<()> {
    let entry = sailing.into_entry()?;
    let mut board = super::open_board()?;
    board.open(MonthKey::of(entry.start)).await;

    let saved = board.save(Draft::new_sailing(entry)).await?;
    println!("{} {}", "Added".green(), saved.render());
    Ok(())
}
