//! Wire form of a sailing, as stored and exchanged with the schedule store.
//!
//! Dates travel as "DD Month YYYY" strings and prices as formatted currency.
//! Conversion to [`ScheduleEntry`] parses both and checks the date invariant.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date::{format_display_date, parse_display_date};
use crate::entry::{EntryId, ScheduleEntry, end_date};
use crate::error::ScheduleError;
use crate::money::Money;

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub year: String,
    pub start_date: String,
    pub end_date: String,
    pub nights: u32,
    pub start_point: String,
    pub end_point: String,
    pub double_price: String,
    pub single_supplement: String,
    #[serde(default)]
    pub detailed_itinerary: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl TryFrom<EntryRecord> for ScheduleEntry {
    type Error = ScheduleError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| ScheduleError::InvalidRecord {
            id: record.id.clone(),
            reason,
        };

        let start = parse_display_date(&record.start_date).map_err(|e| invalid(e.to_string()))?;
        let end = parse_display_date(&record.end_date).map_err(|e| invalid(e.to_string()))?;

        if end_date(start, record.nights) != Some(end) {
            return Err(invalid(format!(
                "end date {} is not {} nights after {}",
                record.end_date, record.nights, record.start_date
            )));
        }

        let double_price =
            Money::parse(&record.double_price).map_err(|e| invalid(e.to_string()))?;
        let single_supplement =
            Money::parse(&record.single_supplement).map_err(|e| invalid(e.to_string()))?;

        let entry = ScheduleEntry {
            id: EntryId::parse(&record.id),
            start,
            end,
            nights: record.nights,
            start_point: record.start_point,
            end_point: record.end_point,
            double_price,
            single_supplement,
            detailed_itinerary: record.detailed_itinerary,
            notes: record.notes,
            is_active: record.is_active,
            sort_order: record.sort_order,
        };

        // The partition always follows the start date; stale labels are only reported.
        let key = entry.month_key();
        let labelled_month = !record.month.is_empty() || !record.year.is_empty();
        if labelled_month
            && (!record.month.eq_ignore_ascii_case(key.month_name())
                || record.year.trim() != key.year.to_string())
        {
            warn!(
                id = %record.id,
                month = %record.month,
                year = %record.year,
                start = %record.start_date,
                "sailing month/year labels disagree with its start date; using the start date"
            );
        }

        Ok(entry)
    }
}

impl From<&ScheduleEntry> for EntryRecord {
    fn from(entry: &ScheduleEntry) -> Self {
        let key = entry.month_key();
        EntryRecord {
            id: entry.id.to_string(),
            month: key.month_name().to_string(),
            year: key.year.to_string(),
            start_date: format_display_date(entry.start),
            end_date: format_display_date(entry.end),
            nights: entry.nights,
            start_point: entry.start_point.clone(),
            end_point: entry.end_point.clone(),
            double_price: entry.double_price.to_string(),
            single_supplement: entry.single_supplement.to_string(),
            detailed_itinerary: entry.detailed_itinerary.clone(),
            notes: entry.notes.clone(),
            is_active: entry.is_active,
            sort_order: entry.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::test_support::*;

    fn august_record() -> EntryRecord {
        serde_json::from_str(
            r#"{
                "id": "42",
                "month": "August",
                "year": "2025",
                "startDate": "01 August 2025",
                "endDate": "04 August 2025",
                "nights": 3,
                "startPoint": "Aswan",
                "endPoint": "Esna",
                "doublePrice": "$700",
                "singleSupplement": "$350",
                "isActive": true,
                "sortOrder": 1
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_record_converts_to_typed_entry() {
        let entry = ScheduleEntry::try_from(august_record()).unwrap();
        assert_eq!(entry.id, EntryId::persisted("42"));
        assert_eq!(entry.start, ymd(2025, 8, 1));
        assert_eq!(entry.end, ymd(2025, 8, 4));
        assert_eq!(entry.double_price, Money::from_dollars(700));
        assert_eq!(entry.detailed_itinerary, "");
        assert_eq!(entry.sort_order, 1);
    }

    #[test]
    fn test_record_with_inconsistent_end_date_is_rejected() {
        let mut record = august_record();
        record.end_date = "05 August 2025".into();
        let err = ScheduleEntry::try_from(record).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRecord { ref id, .. } if id == "42"));
    }

    #[test]
    fn test_record_with_bad_price_is_rejected() {
        let mut record = august_record();
        record.double_price = "call us".into();
        assert!(ScheduleEntry::try_from(record).is_err());
    }

    #[test]
    fn test_mislabelled_month_still_follows_start_date() {
        let mut record = august_record();
        record.month = "September".into();
        let entry = ScheduleEntry::try_from(record).unwrap();
        assert_eq!(entry.month_key().month, 8);
    }

    #[test]
    fn test_entry_to_record_formats_boundary_fields() {
        let entry = persisted("7", ymd(2025, 8, 30), 4);
        let record = EntryRecord::from(&entry);
        assert_eq!(record.month, "August");
        assert_eq!(record.year, "2025");
        assert_eq!(record.start_date, "30 August 2025");
        assert_eq!(record.end_date, "03 September 2025");
        assert_eq!(record.double_price, "$700");
        assert_eq!(ScheduleEntry::try_from(record).unwrap(), entry);
    }
}
