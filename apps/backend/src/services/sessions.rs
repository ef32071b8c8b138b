//! Per-session card collections with a staleness window.
//!
//! A session is whatever UI context extracted the cards (a browser tab in
//! practice). Entries older than the TTL are treated as absent.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use quizwall_core::CardCollection;

use crate::error::{ApiError, Result};

struct Entry {
    collection: CardCollection,
    touched_at: DateTime<Utc>,
}

pub struct SessionStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store `collection` for `session_id`, replacing whatever was there.
    pub fn put(&self, session_id: &str, collection: CardCollection, now: DateTime<Utc>) {
        let mut entries = self.lock();
        entries.insert(
            session_id.to_string(),
            Entry {
                collection,
                touched_at: now,
            },
        );
    }

    /// The session's collection if it exists and is still fresh.
    pub fn get(&self, session_id: &str, now: DateTime<Utc>) -> Option<CardCollection> {
        let entries = self.lock();
        entries
            .get(session_id)
            .filter(|e| self.is_fresh(e, now))
            .map(|e| e.collection.clone())
    }

    /// Apply `f` to a fresh session's collection and refresh its timestamp.
    pub fn update<T>(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut CardCollection) -> Result<T>,
    ) -> Result<T> {
        let mut entries = self.lock();
        let entry = entries
            .get_mut(session_id)
            .filter(|e| now - e.touched_at < self.ttl)
            .ok_or_else(|| ApiError::NotFound("No cards found".to_string()))?;

        let out = f(&mut entry.collection)?;
        entry.touched_at = now;
        Ok(out)
    }

    /// Forget a session. Returns whether it existed.
    pub fn remove(&self, session_id: &str) -> bool {
        let mut entries = self.lock();
        entries.remove(session_id).is_some()
    }

    /// Drop every stale entry. Returns how many were dropped.
    pub fn purge_stale(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, e| now - e.touched_at < ttl);
        before - entries.len()
    }

    // A panic inside `update` must not lock out every other session.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.touched_at < self.ttl
    }
}
