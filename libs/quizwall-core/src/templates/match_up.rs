//! Match Up (template id 3).

use rand::seq::SliceRandom;
use rand::RngCore;

use super::ExportTemplate;
use crate::types::{
    FlashcardPair, FormattedPayload, MatchUpPayload, TemplateKind, TemplateMetadata,
};

pub struct MatchUpTemplate {
    metadata: TemplateMetadata,
}

impl Default for MatchUpTemplate {
    fn default() -> Self {
        Self {
            metadata: TemplateMetadata {
                kind: TemplateKind::MatchUp,
                template_id: 3,
                name: "Match Up".to_string(),
                description: "Match keywords with their definitions".to_string(),
                image: Some("images/match-up.png".to_string()),
            },
        }
    }
}

impl ExportTemplate for MatchUpTemplate {
    fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    /// Terms stay in card order; definitions are permuted with a
    /// Fisher-Yates shuffle and `index_mapping` records where each came from.
    fn format_cards(
        &self,
        cards: &[FlashcardPair],
        title: &str,
        rng: &mut dyn RngCore,
    ) -> FormattedPayload {
        let left = cards.iter().map(|c| c.term.clone()).collect();

        let mut index_mapping: Vec<usize> = (0..cards.len()).collect();
        index_mapping.shuffle(rng);
        let right = index_mapping
            .iter()
            .map(|&i| cards[i].definition.clone())
            .collect();

        FormattedPayload::MatchUp(MatchUpPayload {
            title: title.to_string(),
            left,
            right,
            index_mapping,
        })
    }
}
