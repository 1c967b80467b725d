use calbridge_core::protocol::Response;
use calbridge_core::store::CalendarStore;
use calbridge_core::CalendarService;

use crate::render::{error_text, Render};

pub async fn run<S: CalendarStore>(
    service: &CalendarService<S>,
    _params: &serde_json::Value,
) -> String {
    match service.list_calendars().await {
        Ok(calendars) if calendars.is_empty() => {
            Response::success("No calendars found".to_string())
        }
        Ok(calendars) => {
            let mut lines = vec!["Available calendars:".to_string()];
            lines.extend(calendars.iter().map(Render::render));
            Response::success(lines.join("\n"))
        }
        Err(e) => Response::error(&error_text(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calbridge_core::calendar::CalendarInfo;
    use calbridge_core::memory::MemoryStore;

    #[tokio::test]
    async fn test_list_calendars_renders_one_line_per_calendar() {
        let store = MemoryStore::new(
            vec![
                CalendarInfo {
                    id: "A".to_string(),
                    name: "Work".to_string(),
                    account: "Office 365".to_string(),
                    account_type: "exchange".to_string(),
                },
                CalendarInfo {
                    id: "B".to_string(),
                    name: "Home".to_string(),
                    account: "iCloud".to_string(),
                    account_type: "caldav".to_string(),
                },
            ],
            "A",
        );
        let service = CalendarService::new(store);

        let response = run(&service, &serde_json::Value::Null).await;
        assert!(response.contains("Available calendars:"));
        assert!(response.contains("id: A"));
        assert!(response.contains("id: B"));
    }
}
