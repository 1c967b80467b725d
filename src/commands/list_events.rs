use calbridge_core::calendar::CalendarSelector;
use calbridge_core::date_range::DateRange;
use calbridge_core::protocol::Response;
use calbridge_core::store::CalendarStore;
use calbridge_core::CalendarService;
use serde::Deserialize;

use crate::render::{error_text, Render};

#[derive(Debug, Deserialize)]
struct ListEventsParams {
    /// Range start: RFC 3339 or YYYY-MM-DD (expands to 00:00:00)
    start: String,
    /// Range end: RFC 3339 or YYYY-MM-DD (expands to 23:59:59)
    end: String,
    #[serde(default)]
    calendar_id: Option<String>,
    #[serde(default)]
    calendar_name: Option<String>,
}

pub async fn run<S: CalendarStore>(
    service: &CalendarService<S>,
    params: &serde_json::Value,
) -> String {
    let params: ListEventsParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    let range = match DateRange::from_args(&params.start, &params.end) {
        Ok(r) => r,
        Err(e) => return Response::error(&error_text(&e)),
    };
    let selector = CalendarSelector::from_parts(params.calendar_id, params.calendar_name);

    match service.list_events(&range, selector.as_ref()).await {
        Ok(events) if events.is_empty() => {
            Response::success("No events found in the specified date range".to_string())
        }
        Ok(events) => {
            let blocks: Vec<String> = events.iter().map(Render::render).collect();
            Response::success(blocks.join("\n\n"))
        }
        Err(e) => Response::error(&error_text(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calbridge_core::calendar::CalendarInfo;
    use calbridge_core::event::{EventDraft, EventTime};
    use calbridge_core::memory::MemoryStore;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn service() -> CalendarService<MemoryStore> {
        let cal = |id: &str, name: &str, account: &str| CalendarInfo {
            id: id.to_string(),
            name: name.to_string(),
            account: account.to_string(),
            account_type: "exchange".to_string(),
        };
        CalendarService::new(MemoryStore::new(
            vec![
                cal("A", "TestDup", "Office 365"),
                cal("B", "TestDup", "Exchange"),
                cal("C", "Work", "iCloud"),
            ],
            "C",
        ))
    }

    async fn seed(service: &CalendarService<MemoryStore>, summary: &str, calendar_id: &str) {
        let draft = EventDraft {
            summary: summary.to_string(),
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 6, 10, 10, 0, 0).unwrap()),
            description: None,
            location: None,
            url: None,
            reminders: Vec::new(),
            recurrence: None,
        };
        let selector = CalendarSelector {
            id: Some(calendar_id.to_string()),
            name: None,
        };
        service.create_event(&draft, Some(&selector)).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_calendar_name_returns_disambiguation_error() {
        let service = service();
        let params = json!({
            "start": "2025-06-01",
            "end": "2025-06-30",
            "calendar_name": "TestDup"
        });
        let response = run(&service, &params).await;
        assert!(response.contains("\"status\":\"error\""));
        assert!(response.contains("id: A"));
        assert!(response.contains("id: B"));
        assert!(response.contains("list_calendars"));
    }

    #[tokio::test]
    async fn test_calendar_id_filter_returns_only_matching_events() {
        let service = service();
        seed(&service, "on A", "A").await;
        seed(&service, "on B", "B").await;

        let params = json!({
            "start": "2025-06-01",
            "end": "2025-06-30",
            "calendar_id": "A"
        });
        let response = run(&service, &params).await;
        assert!(response.contains("on A"));
        assert!(!response.contains("on B"));
    }

    #[tokio::test]
    async fn test_empty_range_reports_no_events() {
        let service = service();
        let params = json!({ "start": "2025-06-01", "end": "2025-06-30" });
        let response = run(&service, &params).await;
        assert!(response.contains("No events found"));
    }
}
