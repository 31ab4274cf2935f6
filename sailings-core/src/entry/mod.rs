//! Schedule entries (sailings).

mod id;
mod record;

pub use id::EntryId;
pub use record::EntryRecord;

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::{MonthKey, format_display_date};
use crate::money::Money;

/// A single departure, generated or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: u32,
    pub start_point: String,
    pub end_point: String,
    pub double_price: Money,
    pub single_supplement: Money,
    pub detailed_itinerary: String,
    pub notes: String,
    pub is_active: bool,
    pub sort_order: i32,
}

/// Departure window used to match persisted sailings against generated slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_display_date(self.start),
            format_display_date(self.end)
        )
    }
}

/// End date of a sailing leaving on `start` for `nights` nights.
pub fn end_date(start: NaiveDate, nights: u32) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::from(nights)))
}

impl ScheduleEntry {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            start: self.start,
            end: self.end,
        }
    }

    /// The (year, month) partition this sailing belongs to, taken from its start date.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::of(self.start)
    }

    pub fn start_text(&self) -> String {
        format_display_date(self.start)
    }

    pub fn end_text(&self) -> String {
        format_display_date(self.end)
    }

    /// Whether `end` is exactly `nights` days after `start`.
    pub fn is_consistent(&self) -> bool {
        end_date(self.start, self.nights) == Some(self.end)
    }

    /// Move the sailing, keeping the end date in step with the night count.
    /// Returns false (and leaves the entry untouched) if the end date overflows.
    pub fn reschedule(&mut self, start: NaiveDate, nights: u32) -> bool {
        match end_date(start, nights) {
            Some(end) => {
                self.start = start;
                self.nights = nights;
                self.end = end;
                true
            }
            None => false,
        }
    }

    pub fn route(&self) -> String {
        format!("{} → {}", self.start_point, self.end_point)
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} nights, {})",
            self.key(),
            self.nights,
            self.route()
        )
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;

    #[test]
    fn test_reschedule_keeps_end_in_step() {
        let mut entry = persisted("1", ymd(2025, 8, 1), 3);
        assert!(entry.is_consistent());
        assert!(entry.reschedule(ymd(2025, 8, 30), 4));
        assert_eq!(entry.end, ymd(2025, 9, 3));
        assert!(entry.is_consistent());
    }

    #[test]
    fn test_month_key_comes_from_start_date() {
        let entry = persisted("1", ymd(2025, 8, 30), 4);
        assert_eq!(entry.month_key().month, 8);
        assert_eq!(entry.month_key().year, 2025);
    }

    #[test]
    fn test_display() {
        let entry = persisted("1", ymd(2025, 8, 1), 3);
        assert_eq!(
            entry.to_string(),
            "01 August 2025 - 04 August 2025 (3 nights, Aswan → Esna)"
        );
    }
}
