//! Calendar helpers: display-date parsing and (year, month) partitions.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DATE_FORMAT;
use crate::error::{ScheduleError, ScheduleResult};

/// Parse a "DD Month YYYY" date. Abbreviated month names are accepted.
pub fn parse_display_date(s: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DISPLAY_DATE_FORMAT)
        .map_err(|_| ScheduleError::DateParse(s.to_string()))
}

/// Render a date as "DD Month YYYY".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Resolve an English month name ("August", "aug") to a month.
pub fn parse_month(name: &str) -> Option<Month> {
    Month::from_str(name.trim()).ok()
}

/// A (year, month) partition of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: Month) -> Self {
        MonthKey {
            year,
            month: month.number_from_month(),
        }
    }

    /// Resolve a month by name. Returns None for unknown names.
    pub fn from_name(year: i32, month_name: &str) -> Option<Self> {
        parse_month(month_name).map(|m| Self::new(year, m))
    }

    /// The partition a date belongs to.
    pub fn of(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month(&self) -> Month {
        // month is always 1..=12 by construction
        Month::try_from(self.month as u8).unwrap_or(Month::January)
    }

    pub fn month_name(&self) -> &'static str {
        self.month().name()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1).and_then(|d| d.pred_opt())
    }

    /// Every calendar day of the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        self.first_day()
            .into_iter()
            .flat_map(|first| first.iter_days())
            .take_while(move |d| d.month() == month)
    }

    /// The following month, rolling over into January of the next year.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        MonthKey::of(date) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_roundtrip_keeps_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(format_display_date(date), "01 August 2025");
        assert_eq!(parse_display_date("01 August 2025").unwrap(), date);
    }

    #[test]
    fn test_parse_display_date_is_lenient_about_case_and_whitespace() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 9).unwrap();
        assert_eq!(parse_display_date("  09 december 2025 ").unwrap(), date);
        assert_eq!(parse_display_date("09 Dec 2025").unwrap(), date);
    }

    #[test]
    fn test_parse_display_date_rejects_iso() {
        assert!(matches!(
            parse_display_date("2025-08-01"),
            Err(ScheduleError::DateParse(_))
        ));
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse_month("August"), Some(Month::August));
        assert_eq!(parse_month("aug"), Some(Month::August));
        assert_eq!(parse_month("Augustus"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn test_month_days_covers_leap_february() {
        let key = MonthKey::new(2024, Month::February);
        let days: Vec<_> = key.days().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().copied(), key.first_day());
        assert_eq!(days.last().copied(), key.last_day());
    }

    #[test]
    fn test_next_rolls_over_year() {
        let key = MonthKey::new(2025, Month::December);
        assert_eq!(key.next(), MonthKey::new(2026, Month::January));
    }
}
