//! Error types for the sailings schedule engine.

use thiserror::Error;

use crate::board::Draft;
use crate::entry::EntryId;

/// Errors that can occur while building or editing a schedule.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected DD Month YYYY")]
    DateParse(String),

    #[error("Invalid amount '{0}'")]
    MoneyParse(String),

    #[error("Invalid schedule record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Schedule store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store rejected a create or update. The draft is handed back so the
    /// operator's input is not lost.
    #[error("Could not save sailing on {}: {reason}", .draft.entry.start_text())]
    SaveConflict { draft: Box<Draft>, reason: String },

    #[error("Sailing '{0}' is generated from the weekly rules and has nothing stored to delete")]
    DeleteRefused(EntryId),

    #[error("Sailing not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
