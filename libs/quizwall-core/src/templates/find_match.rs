//! Find the Match (template id 46).

use rand::RngCore;

use super::ExportTemplate;
use crate::types::{
    FindMatchPayload, FlashcardPair, FormattedPayload, MatchingPair, TemplateKind,
    TemplateMetadata,
};

pub struct FindMatchTemplate {
    metadata: TemplateMetadata,
}

impl Default for FindMatchTemplate {
    fn default() -> Self {
        Self {
            metadata: TemplateMetadata {
                kind: TemplateKind::FindMatch,
                template_id: 46,
                name: "Find the Match".to_string(),
                description: "Find matching pairs of keywords and definitions".to_string(),
                image: Some("images/find-match.png".to_string()),
            },
        }
    }
}

impl ExportTemplate for FindMatchTemplate {
    fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    fn format_cards(
        &self,
        cards: &[FlashcardPair],
        title: &str,
        _rng: &mut dyn RngCore,
    ) -> FormattedPayload {
        let items = cards
            .iter()
            .map(|card| MatchingPair {
                keyword: card.term.clone(),
                definition: card.definition.clone(),
            })
            .collect();

        FormattedPayload::FindMatch(FindMatchPayload {
            title: title.to_string(),
            items,
        })
    }
}
