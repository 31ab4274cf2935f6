//! Which month is open for each year, and tagging of in-flight fetches.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::date::MonthKey;
use crate::entry::ScheduleEntry;
use crate::upcoming::default_month;

/// The month the operator last opened, per year.
#[derive(Debug, Clone, Default)]
pub struct MonthSelection {
    months: HashMap<i32, u32>,
}

impl MonthSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, key: MonthKey) {
        self.months.insert(key.year, key.month);
    }

    pub fn selected(&self, year: i32) -> Option<MonthKey> {
        self.months.get(&year).map(|&month| MonthKey { year, month })
    }

    /// The selected month for `year`, or the default month (which is then remembered).
    pub fn selected_or_default<F>(&mut self, year: i32, reference: NaiveDate, schedule_for: F) -> MonthKey
    where
        F: FnMut(MonthKey) -> Vec<ScheduleEntry>,
    {
        if let Some(key) = self.selected(year) {
            return key;
        }
        let key = default_month(year, reference, schedule_for);
        self.select(key);
        key
    }
}

/// Identifies the (year, month) a fetch was started for. A result is only
/// applied if its ticket still matches the current selection when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    key: MonthKey,
}

impl FetchTicket {
    pub fn new(key: MonthKey) -> Self {
        FetchTicket { key }
    }

    pub fn key(&self) -> MonthKey {
        self.key
    }

    pub fn is_current(&self, current: Option<MonthKey>) -> bool {
        current == Some(self.key)
    }
}
