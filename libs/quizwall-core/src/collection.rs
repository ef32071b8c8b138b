//! Editable, ordered card collection.
//!
//! Reversal is tracked per card as a set of reversed ids; "reverse all" is the
//! bulk form of the same state. Cards are never swapped in place: every view
//! and every export goes through [`CardCollection::materialize`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::{CardSource, FlashcardPair, FlashcardSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCollection {
    title: String,
    source: CardSource,
    cards: Vec<FlashcardPair>,
    reversed: BTreeSet<String>,
    next_id: u64,
}

impl CardCollection {
    /// Empty collection.
    pub fn new(title: impl Into<String>, source: CardSource) -> Self {
        Self {
            title: title.into(),
            source,
            cards: Vec::new(),
            reversed: BTreeSet::new(),
            next_id: 0,
        }
    }

    /// Collection seeded from an extracted set. The id counter starts past
    /// every numeric id already present.
    pub fn from_set(set: FlashcardSet) -> Self {
        let next_id = set
            .cards
            .iter()
            .filter_map(|c| c.id.parse::<u64>().ok())
            .filter_map(|id| id.checked_add(1))
            .max()
            .unwrap_or(0)
            .max(set.cards.len() as u64);

        Self {
            title: set.title,
            source: set.source,
            cards: set.cards,
            reversed: BTreeSet::new(),
            next_id,
        }
    }

    /// Discard everything and start over from a fresh extraction.
    pub fn replace(&mut self, set: FlashcardSet) {
        *self = Self::from_set(set);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn source(&self) -> CardSource {
        self.source
    }

    /// Cards as stored, without reversal applied.
    pub fn cards(&self) -> &[FlashcardPair] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a card under a fresh id and return that id.
    pub fn add(&mut self, term: impl Into<String>, definition: impl Into<String>) -> String {
        let id = self.allocate_id();
        self.cards.push(FlashcardPair {
            id: id.clone(),
            term: term.into(),
            definition: definition.into(),
        });
        id
    }

    /// Remove the card at `index`. Other ids are untouched.
    pub fn remove(&mut self, index: usize) -> Result<FlashcardPair> {
        self.check_index(index)?;
        let card = self.cards.remove(index);
        self.reversed.remove(&card.id);
        Ok(card)
    }

    /// Replace both texts of the card at `index`, keeping its id.
    pub fn edit(
        &mut self,
        index: usize,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Result<()> {
        self.check_index(index)?;
        let card = &mut self.cards[index];
        card.term = term.into();
        card.definition = definition.into();
        Ok(())
    }

    /// Flip the reversal flag of one card. Returns the new flag.
    pub fn toggle_reversed(&mut self, id: &str) -> Result<bool> {
        if !self.cards.iter().any(|c| c.id == id) {
            return Err(CoreError::CardNotFound(id.to_string()));
        }
        if self.reversed.remove(id) {
            Ok(false)
        } else {
            self.reversed.insert(id.to_string());
            Ok(true)
        }
    }

    /// Mark every card reversed, or none.
    pub fn set_all_reversed(&mut self, reversed: bool) {
        self.reversed = if reversed {
            self.cards.iter().map(|c| c.id.clone()).collect()
        } else {
            BTreeSet::new()
        };
    }

    pub fn is_reversed(&self, id: &str) -> bool {
        self.reversed.contains(id)
    }

    /// True when the collection is non-empty and every card is reversed.
    pub fn all_reversed(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| self.reversed.contains(&c.id))
    }

    /// How one card is shown and exported.
    pub fn project(&self, card: &FlashcardPair) -> FlashcardPair {
        if self.is_reversed(&card.id) {
            card.reversed()
        } else {
            card.clone()
        }
    }

    /// Export-ready cards: same order and ids, reversed cards swapped.
    pub fn materialize(&self) -> Vec<FlashcardPair> {
        self.cards.iter().map(|c| self.project(c)).collect()
    }

    /// Materialized cards as a set carrying this collection's title and source.
    pub fn to_set(&self) -> FlashcardSet {
        FlashcardSet {
            title: self.title.clone(),
            source: self.source,
            cards: self.materialize(),
        }
    }

    // Wraps at u64::MAX; a finite collection always leaves a free id.
    fn allocate_id(&mut self) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id = self.next_id.wrapping_add(1);
            if !self.cards.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.cards.len() {
            Ok(())
        } else {
            Err(CoreError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            })
        }
    }
}
