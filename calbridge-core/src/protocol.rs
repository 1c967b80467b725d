//! Store shim protocol.
//!
//! Defines the JSON protocol used for communication between calbridge and
//! store shim binaries over stdin/stdout.
//!
//! The protocol is language-agnostic on purpose: the EventKit shim is a
//! native macOS executable, and any executable that speaks the JSON
//! protocol can serve as a store.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::calendar::CalendarInfo;
use crate::event::{Event, EventChanges, EventDraft};

/// A typed command the store must implement.
pub trait StoreCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListCalendars,
    ListEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
}

/// Request envelope sent to the store shim.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response envelope sent back by the store shim.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// Enumerate every calendar in the store, unfiltered.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCalendars {}

impl StoreCommand for ListCalendars {
    type Response = Vec<CalendarInfo>;
    fn command() -> Command {
        Command::ListCalendars
    }
}

/// List events within a time range, optionally pre-filtered to a calendar
/// set. The pre-filter is an optimization hint; calbridge re-checks the
/// owning calendar of every returned event.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEvents {
    /// RFC 3339 range start
    pub from: String,
    /// RFC 3339 range end
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_ids: Option<Vec<String>>,
}

impl StoreCommand for ListEvents {
    type Response = Vec<Event>;
    fn command() -> Command {
        Command::ListEvents
    }
}

/// Create a new event. `calendar_id` is already resolved; absent means the
/// store's default calendar.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    pub event: EventDraft,
}

impl StoreCommand for CreateEvent {
    type Response = Event;
    fn command() -> Command {
        Command::CreateEvent
    }
}

/// Apply field changes to an existing event. A present `calendar_id` moves
/// the event to that calendar.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    pub changes: EventChanges,
}

impl StoreCommand for UpdateEvent {
    type Response = Event;
    fn command() -> Command {
        Command::UpdateEvent
    }
}

/// Delete an event by id. Calendar resolution is not involved: the event
/// id alone identifies the target.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEvent {
    pub event_id: String,
}

impl StoreCommand for DeleteEvent {
    type Response = ();
    fn command() -> Command {
        Command::DeleteEvent
    }
}
