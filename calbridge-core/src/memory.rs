//! In-memory calendar store.
//!
//! Mirrors the semantics the shim binaries provide (default calendar,
//! store-assigned identifiers, enumeration order). Backs the test suite and
//! works as a throwaway store for local development.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::calendar::CalendarInfo;
use crate::date_range::DateRange;
use crate::error::{CalBridgeError, CalBridgeResult};
use crate::event::{Event, EventChanges, EventDraft, EventStatus};
use crate::store::CalendarStore;

pub struct MemoryStore {
    calendars: Vec<CalendarInfo>,
    default_calendar_id: String,
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    /// `default_calendar_id` must name one of `calendars`; it receives
    /// events created without an explicit calendar.
    pub fn new(calendars: Vec<CalendarInfo>, default_calendar_id: &str) -> Self {
        assert!(
            calendars.iter().any(|c| c.id == default_calendar_id),
            "default calendar id must exist in the store"
        );
        MemoryStore {
            calendars,
            default_calendar_id: default_calendar_id.to_string(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn with_events(self, events: Vec<Event>) -> Self {
        *self.events.lock().unwrap() = events;
        self
    }

    fn calendar(&self, id: &str) -> CalBridgeResult<&CalendarInfo> {
        self.calendars
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CalBridgeError::Store(format!("Unknown calendar id '{}'", id)))
    }
}

fn overlaps(event: &Event, range: &DateRange) -> bool {
    event.end.to_utc_end() >= range.from && event.start.to_utc() <= range.to
}

fn apply_changes(event: &mut Event, changes: &EventChanges) {
    if let Some(summary) = &changes.summary {
        event.summary = summary.clone();
    }
    if let Some(start) = &changes.start {
        event.start = start.clone();
    }
    if let Some(end) = &changes.end {
        event.end = end.clone();
    }
    if let Some(description) = &changes.description {
        event.description = Some(description.clone());
    }
    if let Some(location) = &changes.location {
        event.location = Some(location.clone());
    }
    if let Some(url) = &changes.url {
        event.url = Some(url.clone());
    }
    if let Some(reminders) = &changes.reminders {
        event.reminders = reminders.clone();
    }
    if let Some(recurrence) = &changes.recurrence {
        event.recurrence = Some(recurrence.clone());
    }
}

#[async_trait]
impl CalendarStore for MemoryStore {
    async fn calendars(&self) -> CalBridgeResult<Vec<CalendarInfo>> {
        Ok(self.calendars.clone())
    }

    async fn events(
        &self,
        range: &DateRange,
        calendar_ids: Option<&[String]>,
    ) -> CalBridgeResult<Vec<Event>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| overlaps(e, range))
            .filter(|e| {
                calendar_ids
                    .map(|ids| ids.contains(&e.calendar_id))
                    .unwrap_or(true)
            })
            .cloned()
            .collect())
    }

    async fn create_event(
        &self,
        calendar_id: Option<&str>,
        draft: &EventDraft,
    ) -> CalBridgeResult<Event> {
        let calendar = self.calendar(calendar_id.unwrap_or(&self.default_calendar_id))?;
        let event = Event {
            id: Uuid::new_v4().to_string(),
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            url: draft.url.clone(),
            start: draft.start.clone(),
            end: draft.end.clone(),
            status: EventStatus::Confirmed,
            calendar_id: calendar.id.clone(),
            calendar_name: calendar.name.clone(),
            reminders: draft.reminders.clone(),
            recurrence: draft.recurrence.clone(),
            organizer: None,
            attendees: Vec::new(),
            updated: Some(chrono::Utc::now()),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn update_event(
        &self,
        event_id: &str,
        calendar_id: Option<&str>,
        changes: &EventChanges,
    ) -> CalBridgeResult<Event> {
        let target = match calendar_id {
            Some(id) => Some(self.calendar(id)?.clone()),
            None => None,
        };

        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| CalBridgeError::Store(format!("No event with id '{}'", event_id)))?;

        apply_changes(event, changes);
        if let Some(calendar) = target {
            event.calendar_id = calendar.id;
            event.calendar_name = calendar.name;
        }
        event.updated = Some(chrono::Utc::now());

        Ok(event.clone())
    }

    async fn delete_event(&self, event_id: &str) -> CalBridgeResult<()> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != event_id);
        if events.len() == before {
            return Err(CalBridgeError::Store(format!(
                "No event with id '{}'",
                event_id
            )));
        }
        Ok(())
    }
}
