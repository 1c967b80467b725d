use calbridge_core::protocol::Response;
use calbridge_core::store::CalendarStore;
use calbridge_core::CalendarService;
use serde::Deserialize;

use crate::render::error_text;

#[derive(Debug, Deserialize)]
struct DeleteEventParams {
    event_id: String,
}

pub async fn run<S: CalendarStore>(
    service: &CalendarService<S>,
    params: &serde_json::Value,
) -> String {
    let params: DeleteEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match service.delete_event(&params.event_id).await {
        Ok(()) => Response::success("Event deleted successfully".to_string()),
        Err(e) => Response::error(&error_text(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calbridge_core::calendar::CalendarInfo;
    use calbridge_core::date_range::DateRange;
    use calbridge_core::event::{EventDraft, EventTime};
    use calbridge_core::memory::MemoryStore;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_removes_the_event() {
        let store = MemoryStore::new(
            vec![CalendarInfo {
                id: "C".to_string(),
                name: "Work".to_string(),
                account: "iCloud".to_string(),
                account_type: "caldav".to_string(),
            }],
            "C",
        );
        let service = CalendarService::new(store);
        let draft = EventDraft {
            summary: "Old meeting".to_string(),
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 6, 10, 10, 0, 0).unwrap()),
            description: None,
            location: None,
            url: None,
            reminders: Vec::new(),
            recurrence: None,
        };
        let event = service.create_event(&draft, None).await.unwrap();

        let response = run(&service, &json!({ "event_id": event.id })).await;
        assert!(response.contains("Event deleted successfully"));

        let range = DateRange::from_args("2025-06-01", "2025-06-30").unwrap();
        assert!(service.list_events(&range, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_event_is_an_error() {
        let store = MemoryStore::new(
            vec![CalendarInfo {
                id: "C".to_string(),
                name: "Work".to_string(),
                account: "iCloud".to_string(),
                account_type: "caldav".to_string(),
            }],
            "C",
        );
        let service = CalendarService::new(store);
        let response = run(&service, &json!({ "event_id": "missing" })).await;
        assert!(response.contains("\"status\":\"error\""));
    }
}
