//! Calendar projections and selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A calendar as exposed by the store (read-only projection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInfo {
    /// Store-assigned identifier. Unique per calendar, stable across sessions.
    pub id: String,
    /// Display name. Not unique: two accounts can each hold a "Work" calendar.
    pub name: String,
    /// Owning account display name (e.g. "iCloud", "work@example.com").
    pub account: String,
    /// Account type tag (e.g. "local", "caldav", "exchange", "subscription").
    pub account_type: String,
}

impl fmt::Display for CalendarInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (id: {}, account: {})", self.name, self.id, self.account)
    }
}

/// How a caller points at a calendar: by id, by name, or both.
///
/// The id always wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarSelector {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl CalendarSelector {
    /// Build a selector from optional request fields.
    /// Returns `None` when neither part is given, so callers can fall back
    /// to store defaults (create) or skip filtering (list).
    pub fn from_parts(id: Option<String>, name: Option<String>) -> Option<Self> {
        if id.is_none() && name.is_none() {
            None
        } else {
            Some(CalendarSelector { id, name })
        }
    }
}
