//! Resolve-then-delegate event operations.
//!
//! Each operation is a single step: resolve the optional calendar selector
//! against the store's current calendars, then hand off to the store. No
//! intermediate state, no retries; the store owns all durable data.

use tracing::debug;

use crate::calendar::{CalendarInfo, CalendarSelector};
use crate::date_range::DateRange;
use crate::error::CalBridgeResult;
use crate::event::{Event, EventChanges, EventDraft};
use crate::resolver::resolve_calendar;
use crate::store::CalendarStore;

pub struct CalendarService<S> {
    store: S,
}

impl<S: CalendarStore> CalendarService<S> {
    pub fn new(store: S) -> Self {
        CalendarService { store }
    }

    /// Display projection of every calendar in the store, unfiltered.
    pub async fn list_calendars(&self) -> CalBridgeResult<Vec<CalendarInfo>> {
        self.store.calendars().await
    }

    /// Events in the range, sorted by start time. A selector narrows the
    /// result to one calendar; events from any other calendar are dropped
    /// even if the store's own pre-filter let them through.
    pub async fn list_events(
        &self,
        range: &DateRange,
        selector: Option<&CalendarSelector>,
    ) -> CalBridgeResult<Vec<Event>> {
        let filter = self.resolve_selector(selector).await?;
        let ids = filter.as_ref().map(|c| vec![c.id.clone()]);

        let mut events = self.store.events(range, ids.as_deref()).await?;
        if let Some(calendar) = &filter {
            events.retain(|e| e.calendar_id == calendar.id);
        }
        events.sort_by_key(|e| e.start.to_utc());
        Ok(events)
    }

    /// Create an event on the selected calendar, or on the store's default
    /// calendar when no selector is given.
    pub async fn create_event(
        &self,
        draft: &EventDraft,
        selector: Option<&CalendarSelector>,
    ) -> CalBridgeResult<Event> {
        if let Some(rule) = &draft.recurrence {
            rule.validate()?;
        }
        let calendar = self.resolve_selector(selector).await?;
        debug!(calendar = ?calendar.as_ref().map(|c| &c.id), "creating event");
        self.store
            .create_event(calendar.as_ref().map(|c| c.id.as_str()), draft)
            .await
    }

    /// Apply changes to an event. A selector is only needed to move the
    /// event to a different calendar.
    pub async fn update_event(
        &self,
        event_id: &str,
        changes: &EventChanges,
        selector: Option<&CalendarSelector>,
    ) -> CalBridgeResult<Event> {
        if let Some(rule) = &changes.recurrence {
            rule.validate()?;
        }
        let calendar = self.resolve_selector(selector).await?;
        debug!(event_id, calendar = ?calendar.as_ref().map(|c| &c.id), "updating event");
        self.store
            .update_event(event_id, calendar.as_ref().map(|c| c.id.as_str()), changes)
            .await
    }

    /// Delete an event by id. No calendar resolution involved.
    pub async fn delete_event(&self, event_id: &str) -> CalBridgeResult<()> {
        debug!(event_id, "deleting event");
        self.store.delete_event(event_id).await
    }

    /// Resolve an optional selector against a fresh calendar enumeration.
    /// Re-enumerates on every call; resolution never caches.
    async fn resolve_selector(
        &self,
        selector: Option<&CalendarSelector>,
    ) -> CalBridgeResult<Option<CalendarInfo>> {
        let Some(selector) = selector else {
            return Ok(None);
        };
        let calendars = self.store.calendars().await?;
        Ok(Some(resolve_calendar(&calendars, selector)?.clone()))
    }
}
