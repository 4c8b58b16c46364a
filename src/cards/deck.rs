//! Per-category draw order.
//!
//! A `DeckState` is built once per game from the prompt bank and a seed.
//! Each category gets its own shuffle, keyed `"<seed>-<category>"` so the
//! categories don't correlate. Drawing only advances a cursor; when the
//! cursor runs off the end it wraps to 0 and the same order repeats.
//! Nothing is ever reshuffled or removed.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryMap};
use super::definition::PromptCard;
use super::registry::PromptBank;
use crate::core::rng::shuffle;
use crate::core::CardId;

/// Shuffled draw order and cursors for every category.
///
/// Invariants (for decks built by `DeckState::new`):
/// - `order[c]` is a permutation of exactly the card ids in category `c`
/// - `next_index[c]` is in `[0, order[c].len())`, or 0 for an empty order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    pub seed: String,
    pub cards_by_id: ImHashMap<CardId, PromptCard>,
    pub order: CategoryMap<Vector<CardId>>,
    pub next_index: CategoryMap<usize>,
}

impl DeckState {
    /// Build decks for a validated bank.
    #[must_use]
    pub fn new(bank: &PromptBank, seed: &str) -> Self {
        Self::from_cards(bank.cards(), seed)
    }

    /// Build decks from raw cards.
    ///
    /// Prefer `new`; this skips content validation and exists for tools
    /// and tests that work with partial catalogs.
    #[must_use]
    pub fn from_cards(cards: &[PromptCard], seed: &str) -> Self {
        let cards_by_id = cards.iter().map(|c| (c.id.clone(), c.clone())).collect();

        let order = CategoryMap::new(|category| {
            let ids: Vec<CardId> = cards
                .iter()
                .filter(|c| c.category == category)
                .map(|c| c.id.clone())
                .collect();
            shuffle(&ids, &format!("{seed}-{category}")).into_iter().collect()
        });

        Self {
            seed: seed.to_string(),
            cards_by_id,
            order,
            next_index: CategoryMap::with_default(),
        }
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&PromptCard> {
        self.cards_by_id.get(id)
    }

    /// Shuffled order for a category.
    #[must_use]
    pub fn order(&self, category: Category) -> &Vector<CardId> {
        &self.order[category]
    }

    /// Index of the next card to deal in a category.
    #[must_use]
    pub fn cursor(&self, category: Category) -> usize {
        self.next_index[category]
    }

    /// The card `draw_next` would deal, without dealing it.
    #[must_use]
    pub fn peek(&self, category: Category) -> Option<&CardId> {
        let order = &self.order[category];
        if order.is_empty() {
            return None;
        }
        order.get(self.wrapped_cursor(category))
    }

    /// Deal the next card in a category and advance its cursor.
    ///
    /// Returns `None` (and changes nothing) if the category is empty.
    pub fn draw_next(&mut self, category: Category) -> Option<CardId> {
        let len = self.order[category].len();
        if len == 0 {
            return None;
        }

        let index = self.wrapped_cursor(category);
        let card_id = self.order[category].get(index).cloned()?;
        self.next_index[category] = (index + 1) % len;
        Some(card_id)
    }

    // Snapshots restored from storage may carry a cursor past the end.
    fn wrapped_cursor(&self, category: Category) -> usize {
        let cursor = self.next_index[category];
        if cursor >= self.order[category].len() {
            0
        } else {
            cursor
        }
    }
}
