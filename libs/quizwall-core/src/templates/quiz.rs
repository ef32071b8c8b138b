//! Multiple choice quiz (template id 5).

use rand::seq::SliceRandom;
use rand::RngCore;

use super::ExportTemplate;
use crate::types::{
    FlashcardPair, FormattedPayload, QuizAnswer, QuizPayload, QuizQuestion, TemplateKind,
    TemplateMetadata,
};

/// Most wrong answers offered per question.
pub const MAX_DISTRACTORS: usize = 3;

pub struct QuizTemplate {
    metadata: TemplateMetadata,
}

impl Default for QuizTemplate {
    fn default() -> Self {
        Self {
            metadata: TemplateMetadata {
                kind: TemplateKind::Quiz,
                template_id: 5,
                name: "Quiz".to_string(),
                description: "Multiple choice quiz with one correct answer".to_string(),
                image: Some("images/quiz.png".to_string()),
            },
        }
    }
}

impl ExportTemplate for QuizTemplate {
    fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    /// One question per card. Distractors are a uniform sample of up to
    /// three definitions from the other cards; the answer list is shuffled.
    fn format_cards(
        &self,
        cards: &[FlashcardPair],
        title: &str,
        rng: &mut dyn RngCore,
    ) -> FormattedPayload {
        let questions = cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let others: Vec<&FlashcardPair> = cards
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, c)| c)
                    .collect();

                let mut answers = vec![QuizAnswer {
                    text: card.definition.clone(),
                    correct: true,
                }];
                answers.extend(
                    others
                        .choose_multiple(rng, MAX_DISTRACTORS)
                        .map(|c| QuizAnswer {
                            text: c.definition.clone(),
                            correct: false,
                        }),
                );
                answers.shuffle(rng);

                QuizQuestion {
                    text: card.term.clone(),
                    answers,
                }
            })
            .collect();

        FormattedPayload::Quiz(QuizPayload {
            title: title.to_string(),
            questions,
        })
    }
}
