//! Detail enrichment cache with request deduplication.

use std::collections::HashMap;

use cinevision_model::{MediaDetails, MediaKey};
use tracing::debug;

/// Fetch status of one cache entry. `Pending` doubles as the in-flight
/// lock: its presence is what suppresses duplicate requests. All mutation
/// happens on the engine's apply thread, so no separate synchronization
/// is needed.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    Pending,
    Ready(MediaDetails),
    Failed,
}

/// Session-scoped enrichment cache keyed by (kind, id).
///
/// Entries are never evicted and a `Failed` entry is never retried; a host
/// that wants a fresh slate drops the whole engine.
#[derive(Debug, Clone, Default)]
pub struct DetailCache {
    entries: HashMap<MediaKey, DetailStatus>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record intent to fetch `key`. Returns true when the caller should
    /// issue the request; an existing entry of any status suppresses it.
    pub fn request(&mut self, key: MediaKey) -> bool {
        if self.entries.contains_key(&key) {
            debug!(%key, "detail fetch suppressed by existing entry");
            return false;
        }
        self.entries.insert(key, DetailStatus::Pending);
        true
    }

    /// Store a successful enrichment.
    pub fn fulfill(&mut self, key: MediaKey, details: MediaDetails) {
        self.entries.insert(key, DetailStatus::Ready(details));
    }

    /// Mark the fetch failed. Consumers degrade silently; the entry stays
    /// failed for the rest of the session.
    pub fn fail(&mut self, key: MediaKey) {
        self.entries.insert(key, DetailStatus::Failed);
    }

    pub fn get(&self, key: MediaKey) -> Option<&DetailStatus> {
        self.entries.get(&key)
    }

    /// The enriched details for `key`, when that fetch has succeeded.
    pub fn ready(&self, key: MediaKey) -> Option<&MediaDetails> {
        match self.entries.get(&key) {
            Some(DetailStatus::Ready(details)) => Some(details),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
