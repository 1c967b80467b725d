//! Date range for event queries.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{CalBridgeError, CalBridgeResult};

/// Inclusive date range for fetching events.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> CalBridgeResult<Self> {
        if to < from {
            return Err(CalBridgeError::InvalidRequest(format!(
                "Range end {} is before range start {}",
                to.to_rfc3339(),
                from.to_rfc3339()
            )));
        }
        Ok(DateRange { from, to })
    }

    /// Parse caller-supplied range bounds.
    ///
    /// RFC 3339 datetimes are taken as-is. Bare `YYYY-MM-DD` dates expand to
    /// day boundaries (`from` = 00:00:00, `to` = 23:59:59) so date-only
    /// ranges are inclusive on both ends.
    pub fn from_args(from: &str, to: &str) -> CalBridgeResult<Self> {
        Self::new(parse_bound(from, false)?, parse_bound(to, true)?)
    }

    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}

fn parse_bound(s: &str, end_of_day: bool) -> CalBridgeResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = if end_of_day {
            date.and_hms_opt(23, 59, 59).unwrap()
        } else {
            date.and_hms_opt(0, 0, 0).unwrap()
        };
        return Ok(dt.and_utc());
    }
    Err(CalBridgeError::InvalidRequest(format!(
        "Invalid date '{}'. Expected RFC 3339 or YYYY-MM-DD",
        s
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_only_bounds_expand_to_day_boundaries() {
        let range = DateRange::from_args("2025-03-01", "2025-03-02").unwrap();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(range.to, Utc.with_ymd_and_hms(2025, 3, 2, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_rfc3339_bounds_pass_through() {
        let range =
            DateRange::from_args("2025-03-01T08:30:00Z", "2025-03-01T17:00:00+02:00").unwrap();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap());
        assert_eq!(range.to, Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(DateRange::from_args("2025-03-02", "2025-03-01").is_err());
    }

    #[test]
    fn test_single_day_range_is_valid() {
        // Same date on both ends still spans the full day
        let range = DateRange::from_args("2025-03-01", "2025-03-01").unwrap();
        assert!(range.from < range.to);
    }
}
