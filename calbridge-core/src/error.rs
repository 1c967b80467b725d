//! Error types for the calbridge ecosystem.

use thiserror::Error;

use crate::calendar::CalendarInfo;

/// Errors that can occur in calbridge operations.
#[derive(Error, Debug)]
pub enum CalBridgeError {
    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    /// The given name matches more than one calendar. Candidates are listed
    /// in the store's enumeration order so callers can retry with an id.
    #[error("Calendar name '{name}' is ambiguous, matches: {}", summarize(.candidates))]
    AmbiguousCalendar {
        name: String,
        candidates: Vec<CalendarInfo>,
    },

    #[error("A calendar id or name is required for this operation")]
    MissingCalendarSelector,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Store shim '{0}' not found in PATH")]
    StoreNotInstalled(String),

    #[error("Store request timed out after {0}s")]
    StoreTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn summarize(candidates: &[CalendarInfo]) -> String {
    candidates
        .iter()
        .map(|c| format!("'{}' ({})", c.id, c.account))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for calbridge operations.
pub type CalBridgeResult<T> = Result<T, CalBridgeError>;
