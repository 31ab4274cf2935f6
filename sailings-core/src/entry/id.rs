//! Sailing identities.
//!
//! Generated sailings get a deterministic identity derived from their calendar
//! slot, so regenerating a month always reproduces the same ids. Persisted
//! sailings carry whatever opaque id the store assigned.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::GENERATED_ID_PREFIX;
use crate::date::MonthKey;

const SLOT_DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryId {
    /// Synthesized from the weekly rules; nothing stored yet.
    Generated {
        month: MonthKey,
        weekday: Weekday,
        date: NaiveDate,
    },
    /// Assigned by the schedule store.
    Persisted(String),
    /// A manually entered sailing that has not been saved yet.
    Unsaved,
}

impl EntryId {
    pub fn generated(month: MonthKey, weekday: Weekday, date: NaiveDate) -> Self {
        EntryId::Generated {
            month,
            weekday,
            date,
        }
    }

    pub fn persisted(id: impl Into<String>) -> Self {
        EntryId::Persisted(id.into())
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, EntryId::Generated { .. })
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, EntryId::Persisted(_))
    }

    /// The store id, if this sailing exists in the store.
    pub fn store_id(&self) -> Option<&str> {
        match self {
            EntryId::Persisted(id) => Some(id),
            _ => None,
        }
    }

    /// Parse the wire form. Empty strings are unsaved drafts, `gen-` strings
    /// that decode cleanly are generated slots, and everything else is a store id.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return EntryId::Unsaved;
        }
        s.strip_prefix(GENERATED_ID_PREFIX)
            .and_then(parse_generated)
            .unwrap_or_else(|| EntryId::Persisted(s.to_string()))
    }
}

/// Decode `2025-08-fri-20250801` (prefix already stripped).
fn parse_generated(s: &str) -> Option<EntryId> {
    let mut parts = s.splitn(4, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let weekday = Weekday::from_str(parts.next()?).ok()?;
    let date = NaiveDate::parse_from_str(parts.next()?, SLOT_DATE_FORMAT).ok()?;

    let key = MonthKey { year, month };
    if !(1..=12).contains(&month) || !key.contains(date) {
        return None;
    }

    Some(EntryId::generated(key, weekday, date))
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Generated {
                month,
                weekday,
                date,
            } => write!(
                f,
                "{}{}-{:02}-{}-{}",
                GENERATED_ID_PREFIX,
                month.year,
                month.month,
                weekday.to_string().to_lowercase(),
                date.format(SLOT_DATE_FORMAT)
            ),
            EntryId::Persisted(id) => write!(f, "{}", id),
            EntryId::Unsaved => Ok(()),
        }
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EntryId::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    fn august_first() -> EntryId {
        EntryId::generated(
            MonthKey::new(2025, Month::August),
            Weekday::Fri,
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        )
    }

    #[test]
    fn test_generated_wire_form() {
        assert_eq!(august_first().to_string(), "gen-2025-08-fri-20250801");
        assert_eq!(EntryId::parse("gen-2025-08-fri-20250801"), august_first());
    }

    #[test]
    fn test_store_ids_are_persisted() {
        let id = EntryId::parse("64f1c2a9");
        assert!(id.is_persisted());
        assert_eq!(id.store_id(), Some("64f1c2a9"));
        assert!(!id.is_generated());
    }

    #[test]
    fn test_malformed_generated_prefix_falls_back_to_store_id() {
        // Date outside the claimed month
        let id = EntryId::parse("gen-2025-08-fri-20250901");
        assert_eq!(id, EntryId::Persisted("gen-2025-08-fri-20250901".into()));
    }

    #[test]
    fn test_empty_id_is_unsaved() {
        assert_eq!(EntryId::parse(""), EntryId::Unsaved);
        assert_eq!(EntryId::Unsaved.store_id(), None);
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let json = serde_json::to_string(&august_first()).unwrap();
        assert_eq!(json, "\"gen-2025-08-fri-20250801\"");
        let back: EntryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, august_first());
    }
}
