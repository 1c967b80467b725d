use calbridge_core::calendar::CalendarSelector;
use calbridge_core::event::{EventDraft, Reminder};
use calbridge_core::protocol::Response;
use calbridge_core::recurrence::RecurrenceRule;
use calbridge_core::store::CalendarStore;
use calbridge_core::CalendarService;
use serde::Deserialize;

use crate::commands::parse_time;
use crate::render::{error_text, Render};

#[derive(Debug, Deserialize)]
struct CreateEventParams {
    summary: String,
    start: String,
    end: String,
    #[serde(default)]
    all_day: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    url: Option<String>,
    /// Minutes before the event to trigger reminders, e.g. [60, 1440]
    #[serde(default)]
    reminders: Vec<i64>,
    #[serde(default)]
    recurrence: Option<RecurrenceRule>,
    #[serde(default)]
    calendar_id: Option<String>,
    /// Omitting both calendar fields targets the store's default calendar
    #[serde(default)]
    calendar_name: Option<String>,
}

pub async fn run<S: CalendarStore>(
    service: &CalendarService<S>,
    params: &serde_json::Value,
) -> String {
    let params: CreateEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    let (start, end) = match (
        parse_time(&params.start, params.all_day),
        parse_time(&params.end, params.all_day),
    ) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => return Response::error(&error_text(&e)),
    };

    let draft = EventDraft {
        summary: params.summary,
        start,
        end,
        description: params.description,
        location: params.location,
        url: params.url,
        reminders: params
            .reminders
            .into_iter()
            .map(|minutes| Reminder { minutes })
            .collect(),
        recurrence: params.recurrence,
    };
    let selector = CalendarSelector::from_parts(params.calendar_id, params.calendar_name);

    match service.create_event(&draft, selector.as_ref()).await {
        Ok(event) => Response::success(format!(
            "Successfully created event: {} (id: {})\n\n{}",
            event.summary,
            event.id,
            event.render()
        )),
        Err(e) => Response::error(&error_text(&e)),
    }
}
