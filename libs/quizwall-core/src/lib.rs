//! Core library for moving Quizlet sets into Wordwall activities.
//!
//! Provides:
//! - Card extraction from Quizlet set pages (multi-strategy cascade)
//! - Editable card collection with per-card reversal
//! - Template formatters (Quiz, Find the Match, Match Up) and their registry
//! - Export orchestration (payload building, session keys, import URLs)

pub mod collection;
pub mod error;
pub mod export;
pub mod extractor;
pub mod normalize;
pub mod registry;
pub mod templates;
pub mod types;

pub use collection::CardCollection;
pub use error::{CoreError, Result, StorageError};
pub use export::{
    build_export_payload, ExportReceipt, ExportStore, Exporter, ImportTarget, SessionKeyGenerator,
};
pub use extractor::{Extractor, FlashcardService, Page, QuizletService};
pub use normalize::normalize;
pub use registry::TemplateRegistry;
pub use templates::ExportTemplate;
pub use types::{
    CardSource, ExportPayload, FlashcardPair, FlashcardSet, FormattedPayload, StoredExport,
    TemplateKind, TemplateMetadata,
};
