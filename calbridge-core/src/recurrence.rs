//! Structured recurrence rules.
//!
//! Kept structured (rather than raw RRULE strings) so store shims can map
//! them onto their native recurrence objects without parsing iCalendar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalBridgeError, CalBridgeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

fn default_interval() -> u32 {
    1
}

/// How an event repeats.
///
/// A rule may end at a date (`until`) or after a number of occurrences
/// (`count`), never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Every N days/weeks/months/years (e.g. 2 = every other week)
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_weekday: Option<Vec<Weekday>>,
}

impl RecurrenceRule {
    pub fn validate(&self) -> CalBridgeResult<()> {
        if self.interval == 0 {
            return Err(CalBridgeError::InvalidRequest(
                "Recurrence interval must be at least 1".into(),
            ));
        }
        if self.until.is_some() && self.count.is_some() {
            return Err(CalBridgeError::InvalidRequest(
                "Only one of 'until' or 'count' can be set on a recurrence rule".into(),
            ));
        }
        Ok(())
    }
}
