//! Log store client abstraction.
//!
//! This module defines the read contract against the platform log store:
//! cursor-paginated retrieval of a named stream's events in chronological
//! order. The pagination token is opaque; the store signals the end of the
//! stream by returning the same token that was just used, not by an error.
//!
//! Absence of the named stream is a distinguishable condition
//! ([`Error::StreamNotFound`]) because callers may recover from it. Every
//! other backend failure keeps its original identity.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single immutable log event within a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    /// Event timestamp (epoch milliseconds).
    pub timestamp: i64,
    /// When the store ingested the event (epoch milliseconds).
    pub ingestion_time: i64,
    /// The logged message.
    pub message: String,
}

impl LogEvent {
    /// Creates a new log event.
    #[must_use]
    pub fn new(timestamp: i64, ingestion_time: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            ingestion_time,
            message: message.into(),
        }
    }
}

/// One page of a stream's events.
#[derive(Debug, Clone, Default)]
pub struct LogEventsPage {
    /// Events in chronological order within the page.
    pub events: Vec<LogEvent>,
    /// Cursor for the next page. Equal to the request token once the stream
    /// is exhausted.
    pub next_forward_token: Option<String>,
}

/// Log store client trait.
///
/// Implementations may target a cloud log service or an in-memory store for
/// testing. All methods are `Send + Sync` so a single client handle can be
/// shared across invocations.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Fetches one page of events from the named stream.
    ///
    /// # Arguments
    ///
    /// * `log_group` - The log group to query
    /// * `log_stream` - The stream within the group
    /// * `start_from_head` - Read from the oldest event forward
    /// * `next_token` - Cursor from the previous page, if any
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamNotFound`] when the named stream does not
    /// exist, and a log store error for any other backend failure. No
    /// internal retry is performed.
    async fn get_log_events(
        &self,
        log_group: &str,
        log_stream: &str,
        start_from_head: bool,
        next_token: Option<&str>,
    ) -> Result<LogEventsPage>;
}

/// In-memory log store for testing.
///
/// Thread-safe via `RwLock`. Not suitable for production. Pages are sliced
/// from the stored event list at a configurable size, and the end of a
/// stream is signalled the same way real stores do it: by handing back the
/// token the caller just used.
#[derive(Debug)]
pub struct MemoryLogStore {
    streams: Arc<RwLock<HashMap<(String, String), Vec<LogEvent>>>>,
    page_size: usize,
}

impl Default for MemoryLogStore {
    fn default() -> Self {
        Self {
            streams: Arc::default(),
            page_size: 10_000,
        }
    }
}

impl MemoryLogStore {
    /// Creates a new empty memory log store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size used when slicing stored events.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Inserts a stream with the given events, replacing any existing one.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert_stream(
        &self,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
        events: Vec<LogEvent>,
    ) {
        self.streams
            .write()
            .expect("memory log store lock poisoned")
            .insert((log_group.into(), log_stream.into()), events);
    }
}

fn parse_offset(token: &str) -> Result<usize> {
    token
        .strip_prefix("f/")
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(|| Error::InvalidInput(format!("invalid pagination token: {token}")))
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn get_log_events(
        &self,
        log_group: &str,
        log_stream: &str,
        start_from_head: bool,
        next_token: Option<&str>,
    ) -> Result<LogEventsPage> {
        if !start_from_head {
            return Err(Error::InvalidInput(
                "memory log store only supports head-first reads".to_string(),
            ));
        }

        let streams = self.streams.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        let events = streams
            .get(&(log_group.to_string(), log_stream.to_string()))
            .ok_or_else(|| Error::stream_not_found(log_group, log_stream))?;

        let offset = match next_token {
            Some(token) => parse_offset(token)?,
            None => 0,
        };

        let end = offset.saturating_add(self.page_size).min(events.len());
        let page = events.get(offset..end).unwrap_or_default().to_vec();

        Ok(LogEventsPage {
            events: page,
            next_forward_token: Some(format!("f/{end}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(messages: &[&str]) -> Vec<LogEvent> {
        messages
            .iter()
            .enumerate()
            .map(|(i, message)| LogEvent::new(i as i64, i as i64, *message))
            .collect()
    }

    #[tokio::test]
    async fn missing_stream_is_stream_not_found() {
        let store = MemoryLogStore::new();
        store.insert_stream("g", "present", events(&["x"]));

        let err = store
            .get_log_events("g", "absent", true, None)
            .await
            .expect_err("stream must be missing");
        assert!(err.is_stream_not_found());
    }

    #[tokio::test]
    async fn pages_preserve_order_and_repeat_token_at_end() {
        let store = MemoryLogStore::new().with_page_size(2);
        store.insert_stream("g", "s", events(&["a", "b", "c"]));

        let first = store
            .get_log_events("g", "s", true, None)
            .await
            .expect("first page");
        let messages: Vec<_> = first.events.iter().map(|e| e.message.clone()).collect();
        assert_eq!(messages, vec!["a", "b"]);

        let token = first.next_forward_token.expect("token");
        let second = store
            .get_log_events("g", "s", true, Some(&token))
            .await
            .expect("second page");
        assert_eq!(second.events.len(), 1);
        assert_eq!(second.events[0].message, "c");

        let token = second.next_forward_token.expect("token");
        let idle = store
            .get_log_events("g", "s", true, Some(&token))
            .await
            .expect("idle page");
        assert!(idle.events.is_empty());
        assert_eq!(idle.next_forward_token.as_deref(), Some(token.as_str()));
    }

    #[tokio::test]
    async fn empty_stream_yields_no_events() {
        let store = MemoryLogStore::new();
        store.insert_stream("g", "s", Vec::new());

        let page = store
            .get_log_events("g", "s", true, None)
            .await
            .expect("page");
        assert!(page.events.is_empty());
        assert_eq!(page.next_forward_token.as_deref(), Some("f/0"));
    }

    #[tokio::test]
    async fn tail_reads_are_rejected() {
        let store = MemoryLogStore::new();
        store.insert_stream("g", "s", events(&["a"]));

        let err = store
            .get_log_events("g", "s", false, None)
            .await
            .expect_err("tail read must be rejected");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn log_event_wire_format_is_camel_case() {
        let event = LogEvent::new(0, 1, "foo");
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["timestamp"], 0);
        assert_eq!(json["ingestionTime"], 1);
        assert_eq!(json["message"], "foo");
    }
}
