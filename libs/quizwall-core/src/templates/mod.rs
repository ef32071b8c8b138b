//! Formatters turning a card list into template-shaped payloads.

pub mod find_match;
pub mod match_up;
pub mod quiz;

use rand::RngCore;

use crate::types::{FlashcardPair, FormattedPayload, TemplateMetadata};

pub use find_match::FindMatchTemplate;
pub use match_up::MatchUpTemplate;
pub use quiz::QuizTemplate;

/// Template contract.
///
/// Formatting never mutates its input and is deterministic for a given
/// random source.
pub trait ExportTemplate: Send + Sync {
    /// Static description of this template.
    fn metadata(&self) -> &TemplateMetadata;

    /// Format `cards` under `title`.
    fn format_cards(
        &self,
        cards: &[FlashcardPair],
        title: &str,
        rng: &mut dyn RngCore,
    ) -> FormattedPayload;
}
