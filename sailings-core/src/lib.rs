//! Core of the sailings departure schedule.
//!
//! Departures are generated from weekly rules, overlaid with the sailings an
//! operator has stored, and trimmed to what is still to come:
//! - `rules` and `recurrence` build the generated month
//! - `reconcile` lays stored sailings over it by departure window
//! - `upcoming` hides departed sailings and picks the month to open
//! - `board` keeps the open month in step with saves and deletes against a `store`

pub mod board;
pub mod config;
pub mod constants;
pub mod date;
pub mod entry;
pub mod error;
pub mod export;
pub mod money;
pub mod reconcile;
pub mod recurrence;
pub mod rules;
pub mod selection;
pub mod store;
pub mod upcoming;

pub use board::{Draft, ScheduleBoard};
pub use date::MonthKey;
pub use entry::{EntryId, EntryRecord, ScheduleEntry, SlotKey};
pub use error::{ScheduleError, ScheduleResult};
pub use money::Money;
pub use reconcile::reconcile;
pub use recurrence::generate;
pub use rules::{RuleSet, SailingTemplate};
pub use upcoming::{default_month, filter_upcoming};
