//! Store-neutral event types.
//!
//! These types represent calendar events in a store-agnostic way. Store
//! shims convert their native API objects into these types, and calbridge
//! works exclusively with them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalBridgeError, CalBridgeResult};
use crate::recurrence::RecurrenceRule;

/// A calendar event (store-neutral read projection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned event identifier
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub status: EventStatus,

    /// Identifier of the owning calendar
    pub calendar_id: String,
    /// Display name of the owning calendar (not unique, see `calendar_id`)
    pub calendar_name: String,

    /// Reminders/alarms for this event
    pub reminders: Vec<Reminder>,
    pub recurrence: Option<RecurrenceRule>,

    pub organizer: Option<Attendee>,
    pub attendees: Vec<Attendee>,

    /// Last modification timestamp
    pub updated: Option<DateTime<Utc>>,
}

/// Fields for creating a new event.
///
/// The target calendar is not part of the draft: it travels separately,
/// after resolution, so the store sees an exact calendar id (or nothing,
/// meaning its default calendar).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
}

/// Field-level changes for an update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<Reminder>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

/// An event attendee (also used for organizer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A reminder/alarm for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Minutes before the event to trigger
    pub minutes: i64,
}

/// An event's start or end: a wall-clock instant, or a date for all-day events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    /// Parse a caller-supplied time string.
    ///
    /// Accepts RFC 3339 (`2025-03-20T15:00:00Z`), a bare datetime taken as
    /// UTC (`2025-03-20T15:00:00` or without seconds), or a bare date for
    /// all-day events (`2025-03-20`).
    pub fn parse(s: &str) -> CalBridgeResult<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(EventTime::DateTime(dt.with_timezone(&Utc)));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(EventTime::DateTime(naive.and_utc()));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(EventTime::Date(date));
        }
        Err(CalBridgeError::InvalidRequest(format!(
            "Invalid date/time '{}'. Expected RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD",
            s
        )))
    }

    /// UTC instant for ordering and range checks.
    /// All-day dates map to midnight UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => *dt,
            EventTime::Date(d) => d.and_hms_opt(0, 0, 0).unwrap().and_utc(),
        }
    }

    /// UTC instant of the latest moment this time covers.
    /// All-day dates extend to the end of the day.
    pub fn to_utc_end(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => *dt,
            EventTime::Date(d) => d.and_hms_opt(23, 59, 59).unwrap().and_utc(),
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let t = EventTime::parse("2025-03-20T15:00:00+02:00").unwrap();
        assert_eq!(
            t,
            EventTime::DateTime(Utc.with_ymd_and_hms(2025, 3, 20, 13, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_naive_datetime_taken_as_utc() {
        let t = EventTime::parse("2025-03-20T15:00").unwrap();
        assert_eq!(
            t,
            EventTime::DateTime(Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_bare_date_is_all_day() {
        let t = EventTime::parse("2025-03-20").unwrap();
        assert!(t.is_all_day());
        assert_eq!(t, EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()));
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(EventTime::parse("next tuesday").is_err());
    }

    #[test]
    fn test_all_day_covers_whole_day() {
        let t = EventTime::parse("2025-03-20").unwrap();
        assert_eq!(t.to_utc(), Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap());
        assert_eq!(
            t.to_utc_end(),
            Utc.with_ymd_and_hms(2025, 3, 20, 23, 59, 59).unwrap()
        );
    }
}
