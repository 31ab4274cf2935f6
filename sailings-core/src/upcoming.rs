//! Hiding departed sailings and choosing which month to show first.

use std::cmp::Ordering;

use chrono::{Datelike, Month, NaiveDate};

use crate::date::MonthKey;
use crate::entry::ScheduleEntry;

/// A sailing is upcoming if it departs on or after the reference day.
pub fn is_upcoming(entry: &ScheduleEntry, reference: NaiveDate) -> bool {
    entry.start >= reference
}

/// Drop sailings that departed before `reference`, keeping the input order.
pub fn filter_upcoming(
    entries: impl IntoIterator<Item = ScheduleEntry>,
    reference: NaiveDate,
) -> Vec<ScheduleEntry> {
    entries
        .into_iter()
        .filter(|e| is_upcoming(e, reference))
        .collect()
}

/// Pick the month to open for `year`.
///
/// Scans from the reference month (January for future years) through
/// December and returns the first month with an upcoming sailing, as reported
/// by `schedule_for`. Falls back to January when nothing is left that year.
pub fn default_month<F>(year: i32, reference: NaiveDate, mut schedule_for: F) -> MonthKey
where
    F: FnMut(MonthKey) -> Vec<ScheduleEntry>,
{
    let january = MonthKey::new(year, Month::January);

    let first_month = match year.cmp(&reference.year()) {
        Ordering::Less => return january,
        Ordering::Equal => reference.month(),
        Ordering::Greater => 1,
    };

    (first_month..=12)
        .map(|month| MonthKey { year, month })
        .find(|key| {
            schedule_for(*key)
                .iter()
                .any(|e| is_upcoming(e, reference))
        })
        .unwrap_or(january)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::test_support::*;
    use crate::reconcile::month_schedule;
    use crate::recurrence::generate;
    use crate::rules::RuleSet;

    #[test]
    fn test_past_sailings_are_dropped_and_today_kept() {
        let entries = generate(&RuleSet::reference(), 2025, "August");
        let reference = ymd(2025, 8, 15); // a Friday departure day

        let upcoming = filter_upcoming(entries.clone(), reference);

        assert!(upcoming.iter().all(|e| e.start >= reference));
        assert_eq!(upcoming.first().map(|e| e.start), Some(reference));
        assert_eq!(
            upcoming.len(),
            entries.iter().filter(|e| e.start >= reference).count()
        );
    }

    #[test]
    fn test_filter_keeps_order() {
        let entries = generate(&RuleSet::reference(), 2025, "August");
        let upcoming = filter_upcoming(entries, ymd(2025, 8, 10));
        assert!(upcoming.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn test_fully_past_month_is_empty() {
        let entries = generate(&RuleSet::reference(), 2025, "August");
        assert!(filter_upcoming(entries, ymd(2025, 9, 15)).is_empty());
    }

    #[test]
    fn test_default_month_skips_past_months() {
        let rules = RuleSet::reference();
        let key = default_month(2025, ymd(2025, 9, 15), |k| month_schedule(&rules, k, &[]));
        assert_eq!(key, MonthKey::new(2025, Month::September));
    }

    #[test]
    fn test_default_month_moves_on_when_current_month_is_done() {
        let rules = RuleSet::reference();
        // Last departure in September 2025 is Tuesday the 30th
        let key = default_month(2025, ymd(2025, 9, 30), |k| month_schedule(&rules, k, &[]));
        assert_eq!(key, MonthKey::new(2025, Month::September));

        let only_fridays = RuleSet::empty().with(
            chrono::Weekday::Fri,
            RuleSet::reference().get(chrono::Weekday::Fri).unwrap().clone(),
        );
        // Last Friday of September 2025 is the 26th
        let key = default_month(2025, ymd(2025, 9, 27), |k| month_schedule(&only_fridays, k, &[]));
        assert_eq!(key, MonthKey::new(2025, Month::October));
    }

    #[test]
    fn test_default_month_for_future_year_starts_in_january() {
        let rules = RuleSet::reference();
        let key = default_month(2026, ymd(2025, 9, 15), |k| month_schedule(&rules, k, &[]));
        assert_eq!(key, MonthKey::new(2026, Month::January));
    }

    #[test]
    fn test_default_month_falls_back_to_january() {
        let key = default_month(2025, ymd(2025, 3, 1), |_| Vec::new());
        assert_eq!(key, MonthKey::new(2025, Month::January));

        let rules = RuleSet::reference();
        let key = default_month(2024, ymd(2025, 3, 1), |k| month_schedule(&rules, k, &[]));
        assert_eq!(key, MonthKey::new(2024, Month::January));
    }

    #[test]
    fn test_default_month_sees_stored_one_offs() {
        let stored = vec![persisted("late", ymd(2025, 12, 3), 2)];
        let key = default_month(2025, ymd(2025, 11, 1), |k| month_schedule(&RuleSet::empty(), k, &stored));
        assert_eq!(key, MonthKey::new(2025, Month::December));
    }
}
