//! Plain-text rendering of calbridge types for tool responses.
//!
//! Output feeds an AI client, not a terminal, so no colors and no tables:
//! labelled lines the caller can quote back verbatim.

use calbridge_core::calendar::CalendarInfo;
use calbridge_core::error::CalBridgeError;
use calbridge_core::event::{Attendee, Event, EventTime};
use calbridge_core::recurrence::RecurrenceRule;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarInfo {
    fn render(&self) -> String {
        format!(
            "- {} (id: {}, account: {}, type: {})",
            self.name, self.id, self.account, self.account_type
        )
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("Event: {}", self.summary),
            format!(" - Identifier: {}", self.id),
            format!(" - Start: {}", render_time(&self.start)),
            format!(" - End: {}", render_time(&self.end)),
            format!(
                " - Calendar: {} (id: {})",
                self.calendar_name, self.calendar_id
            ),
        ];
        if let Some(location) = &self.location {
            lines.push(format!(" - Location: {}", location));
        }
        if let Some(description) = &self.description {
            lines.push(format!(" - Description: {}", description));
        }
        if let Some(url) = &self.url {
            lines.push(format!(" - URL: {}", url));
        }
        if !self.reminders.is_empty() {
            let offsets: Vec<String> = self
                .reminders
                .iter()
                .map(|r| r.minutes.to_string())
                .collect();
            lines.push(format!(
                " - Reminders (minutes before): {}",
                offsets.join(", ")
            ));
        }
        lines.push(format!(" - Status: {:?}", self.status));
        if let Some(organizer) = &self.organizer {
            lines.push(format!(" - Organizer: {}", render_attendee(organizer)));
        }
        if !self.attendees.is_empty() {
            let names: Vec<String> = self.attendees.iter().map(render_attendee).collect();
            lines.push(format!(" - Attendees: {}", names.join(", ")));
        }
        if let Some(rule) = &self.recurrence {
            lines.push(format!(" - Recurrence: {}", render_recurrence(rule)));
        }
        lines.join("\n")
    }
}

pub fn render_time(time: &EventTime) -> String {
    match time {
        EventTime::DateTime(dt) => dt.to_rfc3339(),
        EventTime::Date(d) => format!("{} (all day)", d.format("%Y-%m-%d")),
    }
}

fn render_attendee(attendee: &Attendee) -> String {
    match (&attendee.name, &attendee.email) {
        (Some(name), Some(email)) => format!("{} <{}>", name, email),
        (Some(name), None) => name.clone(),
        (None, Some(email)) => email.clone(),
        (None, None) => "(unknown)".to_string(),
    }
}

fn render_recurrence(rule: &RecurrenceRule) -> String {
    let mut parts = vec![format!("{:?}", rule.frequency).to_lowercase()];
    if rule.interval > 1 {
        parts.push(format!("every {}", rule.interval));
    }
    if let Some(until) = &rule.until {
        parts.push(format!("until {}", until.to_rfc3339()));
    }
    if let Some(count) = rule.count {
        parts.push(format!("{} occurrences", count));
    }
    parts.join(", ")
}

/// Turn a failure into the message the calling client sees.
///
/// Resolver failures carry retry guidance: the whole point of the ambiguous
/// error is to get the caller to `list_calendars` and come back with an id.
pub fn error_text(err: &CalBridgeError) -> String {
    match err {
        CalBridgeError::AmbiguousCalendar { name, candidates } => {
            let mut lines = vec![format!(
                "Calendar name '{}' matches {} calendars:",
                name,
                candidates.len()
            )];
            lines.extend(candidates.iter().map(Render::render));
            lines.push(
                "Run list_calendars and retry with the calendar_id of the one you want."
                    .to_string(),
            );
            lines.join("\n")
        }
        CalBridgeError::CalendarNotFound(what) => format!(
            "Calendar not found: {}. Run list_calendars to see the available calendars.",
            what
        ),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal(id: &str, name: &str, account: &str) -> CalendarInfo {
        CalendarInfo {
            id: id.to_string(),
            name: name.to_string(),
            account: account.to_string(),
            account_type: "exchange".to_string(),
        }
    }

    #[test]
    fn test_ambiguous_error_names_every_candidate_and_the_retry_tool() {
        let err = CalBridgeError::AmbiguousCalendar {
            name: "TestDup".to_string(),
            candidates: vec![cal("A", "TestDup", "Office 365"), cal("B", "TestDup", "Exchange")],
        };
        let text = error_text(&err);
        assert!(text.contains("'TestDup' matches 2 calendars"));
        assert!(text.contains("id: A"));
        assert!(text.contains("id: B"));
        assert!(text.contains("list_calendars"));
        assert!(text.contains("calendar_id"));
    }

    #[test]
    fn test_not_found_error_suggests_list_calendars() {
        let err = CalBridgeError::CalendarNotFound("name 'Gym'".to_string());
        let text = error_text(&err);
        assert!(text.contains("name 'Gym'"));
        assert!(text.contains("list_calendars"));
    }

    #[test]
    fn test_calendar_line_carries_all_disambiguation_fields() {
        let line = cal("ABC-123", "Work", "work@example.com").render();
        assert!(line.contains("Work"));
        assert!(line.contains("ABC-123"));
        assert!(line.contains("work@example.com"));
        assert!(line.contains("exchange"));
    }
}
