//! Export orchestration: format, stamp, store, and point at the import page.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::error::{Result, StorageError};
use crate::registry::TemplateRegistry;
use crate::templates::ExportTemplate;
use crate::types::{ExportPayload, FlashcardPair, FormattedPayload, StoredExport, TemplateKind};

pub const DEFAULT_SESSION_KEY_PREFIX: &str = "wordwall_export_";
pub const DEFAULT_IMPORT_BASE_URL: &str = "https://wordwall.net/create/entercontent";

/// Persistence boundary for exports. Implementations live outside the core.
pub trait ExportStore: Send + Sync {
    fn save(
        &self,
        session_key: &str,
        export: StoredExport,
    ) -> std::result::Result<(), StorageError>;

    fn load(&self, session_key: &str) -> std::result::Result<Option<StoredExport>, StorageError>;
}

/// Issues session keys: a fixed prefix plus a millisecond timestamp that
/// never repeats within the process.
#[derive(Debug)]
pub struct SessionKeyGenerator {
    prefix: String,
    last: AtomicI64,
}

impl SessionKeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last: AtomicI64::new(i64::MIN),
        }
    }

    pub fn next_key(&self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = millis.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return format!("{}{}", self.prefix, candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for SessionKeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_KEY_PREFIX)
    }
}

/// Where the downstream import is triggered.
#[derive(Debug, Clone)]
pub struct ImportTarget {
    pub base_url: String,
}

impl ImportTarget {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `base?templateId=<id>&folderId=0&sessionKey=<key>`
    pub fn url(&self, template_id: u32, session_key: &str) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("templateId", &template_id.to_string())
            .append_pair("folderId", "0")
            .append_pair("sessionKey", session_key);
        Ok(url.into())
    }
}

impl Default for ImportTarget {
    fn default() -> Self {
        Self::new(DEFAULT_IMPORT_BASE_URL)
    }
}

/// Result of a stored export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub session_key: String,
    pub url: String,
    pub template_id: u32,
}

/// Resolve the formatter, run it and stamp the canonical record.
pub fn build_export_payload(
    registry: &TemplateRegistry,
    cards: &[FlashcardPair],
    title: &str,
    kind: TemplateKind,
    rng: &mut dyn RngCore,
    now: DateTime<Utc>,
) -> Result<(ExportPayload, FormattedPayload)> {
    let template = registry.get(kind)?;
    Ok(assemble(template, cards, title, rng, now))
}

fn assemble(
    template: &dyn ExportTemplate,
    cards: &[FlashcardPair],
    title: &str,
    rng: &mut dyn RngCore,
    now: DateTime<Utc>,
) -> (ExportPayload, FormattedPayload) {
    let formatted = template.format_cards(cards, title, rng);
    let payload = ExportPayload {
        title: title.to_string(),
        template: template.metadata().kind,
        cards: cards.to_vec(),
        created_at: now,
    };
    (payload, formatted)
}

/// Glue between registry, store, key generator and import target.
pub struct Exporter<'a> {
    registry: &'a TemplateRegistry,
    store: &'a dyn ExportStore,
    keys: &'a SessionKeyGenerator,
    target: &'a ImportTarget,
}

impl<'a> Exporter<'a> {
    pub fn new(
        registry: &'a TemplateRegistry,
        store: &'a dyn ExportStore,
        keys: &'a SessionKeyGenerator,
        target: &'a ImportTarget,
    ) -> Self {
        Self {
            registry,
            store,
            keys,
            target,
        }
    }

    /// Build, persist and return where to import from. Storage failures are
    /// returned to the caller untouched.
    pub fn export(
        &self,
        cards: &[FlashcardPair],
        title: &str,
        kind: TemplateKind,
        rng: &mut dyn RngCore,
    ) -> Result<ExportReceipt> {
        let now = Utc::now();
        let template = self.registry.get(kind)?;
        let template_id = template.metadata().template_id;
        let (data, formatted) = assemble(template, cards, title, rng, now);
        let session_key = self.keys.next_key(now);
        let url = self.target.url(template_id, &session_key)?;

        self.store.save(
            &session_key,
            StoredExport {
                data,
                formatted,
                template_id,
            },
        )?;
        info!(
            session_key = %session_key,
            template = %kind,
            template_id,
            cards = cards.len(),
            "export stored"
        );

        Ok(ExportReceipt {
            session_key,
            url,
            template_id,
        })
    }

    /// Export stored under `session_key`, if any.
    pub fn fetch(&self, session_key: &str) -> Result<Option<StoredExport>> {
        Ok(self.store.load(session_key)?)
    }
}
