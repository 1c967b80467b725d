//! Calendar store access.
//!
//! The store is external: calendars and events live in the platform
//! calendar service, reached through a shim binary that speaks the JSON
//! protocol over stdin/stdout (see [`crate::protocol`]). The shim owns all
//! native-API concerns; calbridge never touches the platform directly.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::calendar::CalendarInfo;
use crate::date_range::DateRange;
use crate::error::{CalBridgeError, CalBridgeResult};
use crate::event::{Event, EventChanges, EventDraft};
use crate::protocol::{self, Request, Response, StoreCommand};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// The operations calbridge needs from a calendar store.
///
/// Implementations are stateless from the caller's perspective: the store
/// itself holds the durable calendars and events.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Every calendar in the store, in the store's enumeration order.
    async fn calendars(&self) -> CalBridgeResult<Vec<CalendarInfo>>;

    /// Events within the range, optionally pre-filtered to a calendar set.
    async fn events(
        &self,
        range: &DateRange,
        calendar_ids: Option<&[String]>,
    ) -> CalBridgeResult<Vec<Event>>;

    /// Create an event on the given calendar, or on the store's default
    /// calendar when `calendar_id` is `None`.
    async fn create_event(
        &self,
        calendar_id: Option<&str>,
        draft: &EventDraft,
    ) -> CalBridgeResult<Event>;

    /// Apply changes to an existing event, moving it to `calendar_id` when
    /// one is given.
    async fn update_event(
        &self,
        event_id: &str,
        calendar_id: Option<&str>,
        changes: &EventChanges,
    ) -> CalBridgeResult<Event>;

    /// Delete an event by id.
    async fn delete_event(&self, event_id: &str) -> CalBridgeResult<()>;
}

/// A store backed by a shim subprocess (`calbridge-store-<name>`).
#[derive(Clone)]
pub struct StoreProcess {
    name: String,
    timeout: Duration,
}

impl StoreProcess {
    pub fn new(name: &str) -> Self {
        Self::with_timeout(name, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(name: &str, timeout: Duration) -> Self {
        StoreProcess {
            name: name.to_string(),
            timeout,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn binary_path(&self) -> CalBridgeResult<std::path::PathBuf> {
        let binary_name = format!("calbridge-store-{}", self.name);
        which::which(&binary_name)
            .map_err(|_| CalBridgeError::StoreNotInstalled(binary_name))
    }

    async fn call<C: StoreCommand>(&self, params: &C) -> CalBridgeResult<C::Response> {
        timeout(self.timeout, self.call_inner(params))
            .await
            .map_err(|_| CalBridgeError::StoreTimeout(self.timeout.as_secs()))?
    }

    async fn call_inner<C: StoreCommand>(&self, params: &C) -> CalBridgeResult<C::Response> {
        let request = Request {
            command: C::command(),
            params: to_params(params)?,
        };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| CalBridgeError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        debug!(shim = %binary_path.display(), command = ?C::command(), "calling store shim");

        let mut child = Command::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                CalBridgeError::Store(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(CalBridgeError::Store(format!(
                "Store shim exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(CalBridgeError::Store(
                "Store shim returned no response".into(),
            ));
        }

        let response: Response<C::Response> = serde_json::from_str(&response_str)
            .map_err(|e| CalBridgeError::Store(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(CalBridgeError::Store(error)),
        }
    }
}

fn to_params<T: Serialize>(value: &T) -> CalBridgeResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| CalBridgeError::Serialization(e.to_string()))
}

#[async_trait]
impl CalendarStore for StoreProcess {
    async fn calendars(&self) -> CalBridgeResult<Vec<CalendarInfo>> {
        self.call(&protocol::ListCalendars {}).await
    }

    async fn events(
        &self,
        range: &DateRange,
        calendar_ids: Option<&[String]>,
    ) -> CalBridgeResult<Vec<Event>> {
        self.call(&protocol::ListEvents {
            from: range.from_rfc3339(),
            to: range.to_rfc3339(),
            calendar_ids: calendar_ids.map(<[String]>::to_vec),
        })
        .await
    }

    async fn create_event(
        &self,
        calendar_id: Option<&str>,
        draft: &EventDraft,
    ) -> CalBridgeResult<Event> {
        self.call(&protocol::CreateEvent {
            calendar_id: calendar_id.map(str::to_string),
            event: draft.clone(),
        })
        .await
    }

    async fn update_event(
        &self,
        event_id: &str,
        calendar_id: Option<&str>,
        changes: &EventChanges,
    ) -> CalBridgeResult<Event> {
        self.call(&protocol::UpdateEvent {
            event_id: event_id.to_string(),
            calendar_id: calendar_id.map(str::to_string),
            changes: changes.clone(),
        })
        .await
    }

    async fn delete_event(&self, event_id: &str) -> CalBridgeResult<()> {
        self.call(&protocol::DeleteEvent {
            event_id: event_id.to_string(),
        })
        .await
    }
}
