//! Tool command handlers.
//!
//! One module per tool. Each handler parses its params, runs the service
//! call, and renders a human-readable response for the calling client.
//! Resolver failures (not-found, ambiguous) come back as error responses
//! carrying retry guidance; store failures pass through unmodified.

pub mod create_event;
pub mod delete_event;
pub mod list_calendars;
pub mod list_events;
pub mod update_event;

use calbridge_core::error::CalBridgeResult;
use calbridge_core::event::EventTime;
use calbridge_core::protocol::{Command, Request};
use calbridge_core::store::CalendarStore;
use calbridge_core::CalendarService;

pub async fn handle_request<S: CalendarStore>(
    service: &CalendarService<S>,
    request: Request,
) -> String {
    match request.command {
        Command::ListCalendars => list_calendars::run(service, &request.params).await,
        Command::ListEvents => list_events::run(service, &request.params).await,
        Command::CreateEvent => create_event::run(service, &request.params).await,
        Command::UpdateEvent => update_event::run(service, &request.params).await,
        Command::DeleteEvent => delete_event::run(service, &request.params).await,
    }
}

/// Parse a caller-supplied time, forcing the all-day date form when asked.
pub(crate) fn parse_time(s: &str, all_day: bool) -> CalBridgeResult<EventTime> {
    let time = EventTime::parse(s)?;
    if all_day {
        return Ok(EventTime::Date(time.to_utc().date_naive()));
    }
    Ok(time)
}
