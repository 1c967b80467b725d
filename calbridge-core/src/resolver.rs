//! Calendar resolution: identifier-preferred, name-fallback with duplicate
//! detection.
//!
//! Calendar names are not unique (two Exchange accounts can each expose a
//! "Work" calendar), so name lookup must refuse to guess. A name matching
//! more than one calendar fails with the full candidate list instead of
//! silently picking the first match.

use crate::calendar::{CalendarInfo, CalendarSelector};
use crate::error::{CalBridgeError, CalBridgeResult};

/// Resolve a selector against the store's current calendar collection.
///
/// The identifier wins when present, regardless of the name. Name lookup
/// requires exactly one match: zero is not-found, two or more is ambiguous.
/// Ambiguous candidates are reported in the order the store enumerated them.
pub fn resolve_calendar<'a>(
    calendars: &'a [CalendarInfo],
    selector: &CalendarSelector,
) -> CalBridgeResult<&'a CalendarInfo> {
    if let Some(id) = &selector.id {
        return calendars
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| CalBridgeError::CalendarNotFound(format!("id '{}'", id)));
    }

    if let Some(name) = &selector.name {
        let matches: Vec<&CalendarInfo> =
            calendars.iter().filter(|c| &c.name == name).collect();
        return match matches.as_slice() {
            [] => Err(CalBridgeError::CalendarNotFound(format!("name '{}'", name))),
            [only] => Ok(only),
            many => Err(CalBridgeError::AmbiguousCalendar {
                name: name.clone(),
                candidates: many.iter().map(|c| (*c).clone()).collect(),
            }),
        };
    }

    Err(CalBridgeError::MissingCalendarSelector)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal(id: &str, name: &str, account: &str) -> CalendarInfo {
        CalendarInfo {
            id: id.to_string(),
            name: name.to_string(),
            account: account.to_string(),
            account_type: "caldav".to_string(),
        }
    }

    fn store() -> Vec<CalendarInfo> {
        vec![
            cal("A", "TestDup", "Office 365"),
            cal("B", "TestDup", "Exchange"),
            cal("C", "Work", "iCloud"),
            cal("D", "Home", "iCloud"),
        ]
    }

    fn by_id(id: &str) -> CalendarSelector {
        CalendarSelector {
            id: Some(id.to_string()),
            name: None,
        }
    }

    fn by_name(name: &str) -> CalendarSelector {
        CalendarSelector {
            id: None,
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_every_enumerated_id_resolves_to_itself() {
        let calendars = store();
        for calendar in &calendars {
            let resolved = resolve_calendar(&calendars, &by_id(&calendar.id)).unwrap();
            assert_eq!(resolved.id, calendar.id);
        }
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let calendars = store();
        let err = resolve_calendar(&calendars, &by_id("nope")).unwrap_err();
        assert!(matches!(err, CalBridgeError::CalendarNotFound(_)));
    }

    #[test]
    fn test_unique_name_resolves() {
        let calendars = store();
        let resolved = resolve_calendar(&calendars, &by_name("Work")).unwrap();
        assert_eq!(resolved.id, "C");
    }

    #[test]
    fn test_duplicate_name_is_ambiguous_with_every_candidate_once() {
        let calendars = store();
        let err = resolve_calendar(&calendars, &by_name("TestDup")).unwrap_err();
        match err {
            CalBridgeError::AmbiguousCalendar { name, candidates } => {
                assert_eq!(name, "TestDup");
                let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
                // Store enumeration order, no omissions, no duplicates
                assert_eq!(ids, vec!["A", "B"]);
                // Each candidate carries its owning account for the caller
                assert_eq!(candidates[0].account, "Office 365");
                assert_eq!(candidates[1].account, "Exchange");
            }
            other => panic!("expected AmbiguousCalendar, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_name_is_not_found_never_ambiguous() {
        let calendars = store();
        let err = resolve_calendar(&calendars, &by_name("Nonexistent")).unwrap_err();
        assert!(matches!(err, CalBridgeError::CalendarNotFound(_)));
    }

    #[test]
    fn test_valid_id_wins_over_ambiguous_name() {
        let calendars = store();
        let selector = CalendarSelector {
            id: Some("C".to_string()),
            name: Some("TestDup".to_string()),
        };
        let resolved = resolve_calendar(&calendars, &selector).unwrap();
        assert_eq!(resolved.id, "C");
    }

    #[test]
    fn test_unknown_id_fails_even_when_name_would_resolve() {
        let calendars = store();
        let selector = CalendarSelector {
            id: Some("nope".to_string()),
            name: Some("Work".to_string()),
        };
        let err = resolve_calendar(&calendars, &selector).unwrap_err();
        assert!(matches!(err, CalBridgeError::CalendarNotFound(_)));
    }

    #[test]
    fn test_empty_selector_is_rejected() {
        let calendars = store();
        let err = resolve_calendar(&calendars, &CalendarSelector::default()).unwrap_err();
        assert!(matches!(err, CalBridgeError::MissingCalendarSelector));
    }

    #[test]
    fn test_empty_store_name_lookup_is_not_found() {
        let err = resolve_calendar(&[], &by_name("Work")).unwrap_err();
        assert!(matches!(err, CalBridgeError::CalendarNotFound(_)));
    }
}
