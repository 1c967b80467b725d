use calbridge_core::calendar::CalendarSelector;
use calbridge_core::event::{EventChanges, Reminder};
use calbridge_core::protocol::Response;
use calbridge_core::recurrence::RecurrenceRule;
use calbridge_core::store::CalendarStore;
use calbridge_core::CalendarService;
use serde::Deserialize;

use crate::commands::parse_time;
use crate::render::{error_text, Render};

#[derive(Debug, Deserialize)]
struct UpdateEventParams {
    event_id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    all_day: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    reminders: Option<Vec<i64>>,
    #[serde(default)]
    recurrence: Option<RecurrenceRule>,
    /// Set one of these only to move the event to a different calendar
    #[serde(default)]
    calendar_id: Option<String>,
    #[serde(default)]
    calendar_name: Option<String>,
}

pub async fn run<S: CalendarStore>(
    service: &CalendarService<S>,
    params: &serde_json::Value,
) -> String {
    let params: UpdateEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    let mut changes = EventChanges {
        summary: params.summary,
        description: params.description,
        location: params.location,
        url: params.url,
        reminders: params
            .reminders
            .map(|offsets| offsets.into_iter().map(|minutes| Reminder { minutes }).collect()),
        recurrence: params.recurrence,
        ..EventChanges::default()
    };
    if let Some(start) = &params.start {
        match parse_time(start, params.all_day) {
            Ok(t) => changes.start = Some(t),
            Err(e) => return Response::error(&error_text(&e)),
        }
    }
    if let Some(end) = &params.end {
        match parse_time(end, params.all_day) {
            Ok(t) => changes.end = Some(t),
            Err(e) => return Response::error(&error_text(&e)),
        }
    }

    let selector = CalendarSelector::from_parts(params.calendar_id, params.calendar_name);

    match service
        .update_event(&params.event_id, &changes, selector.as_ref())
        .await
    {
        Ok(event) => Response::success(format!(
            "Successfully updated event: {}\n\n{}",
            event.summary,
            event.render()
        )),
        Err(e) => Response::error(&error_text(&e)),
    }
}
