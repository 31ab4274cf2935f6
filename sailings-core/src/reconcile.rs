//! Merging generated sailings with persisted ones.
//!
//! Sailings are matched by departure window (start and end date). A persisted
//! sailing always replaces the generated one in its window; persisted sailings
//! in windows the rules never produce are kept as one-off departures.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::date::MonthKey;
use crate::entry::{ScheduleEntry, SlotKey};
use crate::recurrence::generate_month;
use crate::rules::RuleSet;

/// Overlay `persisted` onto `generated` and return the result in departure order.
///
/// When two persisted sailings share a window, the one with the lower
/// `sort_order` is kept; on equal `sort_order` the one listed later wins.
pub fn reconcile(
    generated: impl IntoIterator<Item = ScheduleEntry>,
    persisted: impl IntoIterator<Item = ScheduleEntry>,
) -> Vec<ScheduleEntry> {
    let mut slots: HashMap<SlotKey, ScheduleEntry> = HashMap::new();

    for entry in generated {
        slots.entry(entry.key()).or_insert(entry);
    }

    for entry in persisted {
        match slots.entry(entry.key()) {
            Entry::Occupied(mut slot) => {
                if supersedes(&entry, slot.get()) {
                    slot.insert(entry);
                } else {
                    debug!(
                        kept = %slot.get().id,
                        dropped = %entry.id,
                        window = %entry.key(),
                        "two stored sailings share a departure window"
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    let mut merged: Vec<ScheduleEntry> = slots.into_values().collect();
    merged.sort_by_key(|e| e.key());
    merged
}

/// Whether `candidate` should take `current`'s place in a shared window.
fn supersedes(candidate: &ScheduleEntry, current: &ScheduleEntry) -> bool {
    if !current.id.is_persisted() {
        return true;
    }
    candidate.id.is_persisted() && candidate.sort_order <= current.sort_order
}

/// The persisted sailings departing in `key`, judged by their start date.
pub fn in_month<'a>(
    persisted: impl IntoIterator<Item = &'a ScheduleEntry>,
    key: MonthKey,
) -> Vec<ScheduleEntry> {
    persisted
        .into_iter()
        .filter(|e| key.contains(e.start))
        .cloned()
        .collect()
}

/// Generate `key`'s sailings and overlay the stored ones departing that month.
pub fn month_schedule(rules: &RuleSet, key: MonthKey, persisted: &[ScheduleEntry]) -> Vec<ScheduleEntry> {
    reconcile(generate_month(rules, key), in_month(persisted, key))
}
