//! CSV and JSON export of a schedule, in the wire record layout.

use crate::entry::{EntryRecord, ScheduleEntry};
use crate::error::{ScheduleError, ScheduleResult};

const CSV_HEADER: [&str; 14] = [
    "id",
    "month",
    "year",
    "startDate",
    "endDate",
    "nights",
    "startPoint",
    "endPoint",
    "doublePrice",
    "singleSupplement",
    "detailedItinerary",
    "notes",
    "isActive",
    "sortOrder",
];

/// One header row plus one row per sailing, fields quoted where needed.
pub fn export_csv(entries: &[ScheduleEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for entry in entries {
        let r = EntryRecord::from(entry);
        let fields = [
            r.id,
            r.month,
            r.year,
            r.start_date,
            r.end_date,
            r.nights.to_string(),
            r.start_point,
            r.end_point,
            r.double_price,
            r.single_supplement,
            r.detailed_itinerary,
            r.notes,
            r.is_active.to_string(),
            r.sort_order.to_string(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        lines.push(row.join(","));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Pretty-printed JSON array of wire records.
pub fn export_json(entries: &[ScheduleEntry]) -> ScheduleResult<String> {
    let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| ScheduleError::Serialization(e.to_string()))
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::test_support::*;
    use crate::money::Money;
    use crate::recurrence::generate;
    use crate::rules::RuleSet;

    #[test]
    fn test_csv_has_header_and_one_row_per_sailing() {
        let entries = generate(&RuleSet::reference(), 2025, "August");
        let csv = export_csv(&entries);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), entries.len() + 1);
        assert!(lines[0].starts_with("id,month,year,startDate"));
        assert_eq!(
            lines[1],
            "gen-2025-08-fri-20250801,August,2025,01 August 2025,04 August 2025,3,Aswan,Esna,$675,$340,,,true,999"
        );
    }

    #[test]
    fn test_csv_quotes_commas_and_quotes() {
        let mut entry = persisted("1", ymd(2025, 8, 1), 3);
        entry.double_price = Money::from_dollars(1_250);
        entry.notes = "Say \"hello\", then board".into();

        let csv = export_csv(&[entry]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"$1,250\""));
        assert!(row.contains("\"Say \"\"hello\"\", then board\""));
    }

    #[test]
    fn test_json_uses_wire_field_names() {
        let entry = persisted("1", ymd(2025, 8, 1), 3);
        let json = export_json(&[entry]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["startDate"], "01 August 2025");
        assert_eq!(value[0]["doublePrice"], "$700");
        assert_eq!(value[0]["isActive"], true);
    }

    #[test]
    fn test_empty_exports() {
        assert_eq!(export_csv(&[]).lines().count(), 1);
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }
}
