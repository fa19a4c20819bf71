//! Explicit cross-test memo store
//!
//! Some independent tests intentionally reuse state a previous test created
//! (e.g. search for the most recently created event instead of creating a new
//! one). That continuity is explicit shared state scoped to one worker
//! process: workflows receive a [`RunMemo`] handle and read/write through
//! typed accessors, never through ambient UI state or module-level globals.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const LATEST_EVENT_NAME: &str = "latest_event_name";
const LATEST_CONTACT_LIST: &str = "latest_contact_list";

/// Worker-scoped key-value memo shared between tests in one process.
#[derive(Debug, Clone, Default)]
pub struct RunMemo {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl RunMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under a key, replacing any previous value
    pub async fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Read a value by key
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Record the name of the most recently created event
    pub async fn set_latest_event_name(&self, name: &str) {
        self.set(LATEST_EVENT_NAME, name).await;
    }

    /// Name of the most recently created event, if any test recorded one
    pub async fn latest_event_name(&self) -> Option<String> {
        self.get(LATEST_EVENT_NAME).await
    }

    /// Record the name of the most recently created contact list
    pub async fn set_latest_contact_list(&self, name: &str) {
        self.set(LATEST_CONTACT_LIST, name).await;
    }

    /// Name of the most recently created contact list, if any
    pub async fn latest_contact_list(&self) -> Option<String> {
        self.get(LATEST_CONTACT_LIST).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memo_round_trip() {
        let memo = RunMemo::new();
        assert_eq!(memo.latest_event_name().await, None);

        memo.set_latest_event_name("Event-1756500000000-42").await;
        assert_eq!(
            memo.latest_event_name().await.as_deref(),
            Some("Event-1756500000000-42")
        );

        memo.set_latest_event_name("Event-1756500000001-7").await;
        assert_eq!(
            memo.latest_event_name().await.as_deref(),
            Some("Event-1756500000001-7")
        );
    }

    #[tokio::test]
    async fn test_memo_handles_share_state() {
        let memo = RunMemo::new();
        let clone = memo.clone();
        clone.set_latest_contact_list("List-1-2").await;
        assert_eq!(memo.latest_contact_list().await.as_deref(), Some("List-1-2"));
    }
}
