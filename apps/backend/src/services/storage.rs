//! In-process export storage keyed by session key.
//!
//! Exports expire `ttl` after they were saved. Expired entries read as absent
//! and are dropped by [`MemoryExportStore::purge_stale`].

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use quizwall_core::{ExportStore, StorageError, StoredExport};

struct Entry {
    export: StoredExport,
    saved_at: DateTime<Utc>,
}

pub struct MemoryExportStore {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryExportStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn save_at(
        &self,
        session_key: &str,
        export: StoredExport,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(
            session_key.to_string(),
            Entry {
                export,
                saved_at: now,
            },
        );
        Ok(())
    }

    pub fn load_at(
        &self,
        session_key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredExport>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .get(session_key)
            .filter(|e| now - e.saved_at < self.ttl)
            .map(|e| e.export.clone()))
    }

    /// Drop every expired export. Returns how many were dropped.
    pub fn purge_stale(&self, now: DateTime<Utc>) -> Result<usize, StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, e| now - e.saved_at < ttl);
        Ok(before - entries.len())
    }
}

impl ExportStore for MemoryExportStore {
    fn save(&self, session_key: &str, export: StoredExport) -> Result<(), StorageError> {
        self.save_at(session_key, export, Utc::now())
    }

    fn load(&self, session_key: &str) -> Result<Option<StoredExport>, StorageError> {
        self.load_at(session_key, Utc::now())
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("export store lock poisoned".to_string())
}
