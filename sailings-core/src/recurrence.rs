//! Weekly departure expansion.
//!
//! Expands the rule set's departure weekdays into concrete sailings for one
//! calendar month. Generated sailings are never stored; they are rebuilt on
//! every call with the same identities.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use rrule::RRuleSet;
use tracing::{debug, warn};

use crate::constants::GENERATED_SORT_ORDER;
use crate::date::MonthKey;
use crate::entry::{EntryId, ScheduleEntry, end_date};
use crate::error::{ScheduleError, ScheduleResult};
use crate::rules::RuleSet;

/// Generate the sailings for a month given by name ("August").
///
/// Unknown month names produce an empty schedule rather than an error.
pub fn generate(rules: &RuleSet, year: i32, month_name: &str) -> Vec<ScheduleEntry> {
    match MonthKey::from_name(year, month_name) {
        Some(key) => generate_month(rules, key),
        None => {
            debug!(year, month = month_name, "unknown month name, nothing to generate");
            Vec::new()
        }
    }
}

/// Generate the sailings for a month, in chronological order.
pub fn generate_month(rules: &RuleSet, key: MonthKey) -> Vec<ScheduleEntry> {
    if rules.is_empty() {
        return Vec::new();
    }

    let dates = occurrence_dates(rules, key).unwrap_or_else(|e| {
        warn!(month = %key, error = %e, "recurrence expansion failed, scanning days instead");
        key.days()
            .filter(|d| rules.get(d.weekday()).is_some())
            .collect()
    });

    dates
        .into_iter()
        .filter_map(|date| generated_entry(rules, key, date))
        .collect()
}

fn generated_entry(rules: &RuleSet, key: MonthKey, date: NaiveDate) -> Option<ScheduleEntry> {
    let weekday = date.weekday();
    let template = rules.get(weekday)?;
    let end = end_date(date, template.nights)?;

    Some(ScheduleEntry {
        id: EntryId::generated(key, weekday, date),
        start: date,
        end,
        nights: template.nights,
        start_point: template.start_point.clone(),
        end_point: template.end_point.clone(),
        double_price: template.double_price,
        single_supplement: template.single_supplement,
        detailed_itinerary: String::new(),
        notes: String::new(),
        is_active: true,
        sort_order: GENERATED_SORT_ORDER,
    })
}

/// Build an iCalendar-format RRULE for the rule set's weekdays, anchored on
/// the first day of the month.
fn build_rrule_string(rules: &RuleSet, first: NaiveDate) -> String {
    let byday: Vec<&str> = rules.weekdays().map(byday_code).collect();

    format!(
        "DTSTART:{}T000000Z\nRRULE:FREQ=WEEKLY;BYDAY={}",
        first.format("%Y%m%d"),
        byday.join(",")
    )
}

fn byday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Departure dates within the month, in order.
fn occurrence_dates(rules: &RuleSet, key: MonthKey) -> ScheduleResult<Vec<NaiveDate>> {
    let (Some(first), Some(last)) = (key.first_day(), key.last_day()) else {
        return Err(ScheduleError::Config(format!("{key} is out of range")));
    };

    let rrule_set: RRuleSet = build_rrule_string(rules, first)
        .parse()
        .map_err(|e| ScheduleError::Config(format!("Invalid weekly rule for {key}: {e}")))?;

    // after/before are exclusive, so widen by a second on each side
    let tz: rrule::Tz = Utc.into();
    let midnight = |d: NaiveDate| {
        d.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| ScheduleError::Config(format!("{d} has no midnight")))
    };
    let range_start = midnight(first)?;
    let range_end = midnight(last)?;
    let after = (range_start - Duration::seconds(1)).with_timezone(&tz);
    let before = (range_end + Duration::seconds(1)).with_timezone(&tz);

    let result = rrule_set.after(after).before(before).all(31);

    // DTSTART may be reported even when it is not a departure weekday
    Ok(result
        .dates
        .iter()
        .map(|dt| dt.date_naive())
        .filter(|d| key.contains(*d) && rules.get(d.weekday()).is_some())
        .collect())
}
