//! Validated prompt catalog.
//!
//! The `PromptBank` is the only way prompt content enters a game. A bank
//! can only be built from content that passes every acceptance rule:
//!
//! - exactly the expected number of cards in each category
//! - no duplicate text within a category (trimmed, case-insensitive)
//! - non-empty text
//! - points in `1..=3`
//! - unique card ids
//!
//! Validation reports every violation, so content authors can fix a
//! whole file in one pass.

use rustc_hash::{FxHashMap, FxHashSet};

use super::category::Category;
use super::definition::PromptCard;
use crate::core::config::EXPECTED_CARDS_PER_CATEGORY;
use crate::core::CardId;
use crate::error::{BankViolation, PromptBankError};

/// Immutable, validated catalog of prompt cards.
///
/// ## Example
///
/// ```
/// use voice_charades::cards::{Category, PromptBank, PromptCard};
///
/// let cards: Vec<PromptCard> = Category::ALL
///     .iter()
///     .map(|&c| PromptCard::new(format!("{c}-1"), c, format!("{c} prompt"), 1))
///     .collect();
///
/// let bank = PromptBank::with_expected_count(cards, 1).unwrap();
/// assert_eq!(bank.len(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptBank {
    cards: Vec<PromptCard>,
}

impl PromptBank {
    /// Accept content using the standard per-category count.
    pub fn new(cards: Vec<PromptCard>) -> Result<Self, PromptBankError> {
        Self::with_expected_count(cards, EXPECTED_CARDS_PER_CATEGORY)
    }

    /// Accept content with a custom per-category count.
    pub fn with_expected_count(
        cards: Vec<PromptCard>,
        expected_per_category: usize,
    ) -> Result<Self, PromptBankError> {
        let violations = Self::validate(&cards, expected_per_category);
        if violations.is_empty() {
            Ok(Self { cards })
        } else {
            Err(PromptBankError::Invalid(violations))
        }
    }

    /// Parse a JSON array of cards and accept it with the standard count.
    pub fn from_json(json: &str) -> Result<Self, PromptBankError> {
        Self::from_json_with_expected_count(json, EXPECTED_CARDS_PER_CATEGORY)
    }

    /// Parse a JSON array of cards and accept it with a custom count.
    pub fn from_json_with_expected_count(
        json: &str,
        expected_per_category: usize,
    ) -> Result<Self, PromptBankError> {
        let cards: Vec<PromptCard> = serde_json::from_str(json)?;
        Self::with_expected_count(cards, expected_per_category)
    }

    /// Check content against every acceptance rule.
    ///
    /// Returns all violations found; empty means the content is acceptable.
    #[must_use]
    pub fn validate(cards: &[PromptCard], expected_per_category: usize) -> Vec<BankViolation> {
        let mut violations = Vec::new();

        for category in Category::ALL {
            let in_category: Vec<&PromptCard> =
                cards.iter().filter(|c| c.category == category).collect();

            if in_category.len() != expected_per_category {
                violations.push(BankViolation::WrongCount {
                    category,
                    expected: expected_per_category,
                    actual: in_category.len(),
                });
            }

            let mut seen: FxHashSet<String> = FxHashSet::default();
            let mut reported: FxHashSet<String> = FxHashSet::default();
            for card in in_category {
                let key = card.normalized_text();
                if !seen.insert(key.clone()) && reported.insert(key.clone()) {
                    violations.push(BankViolation::DuplicateText { category, text: key });
                }
            }
        }

        let mut id_counts: FxHashMap<&CardId, usize> = FxHashMap::default();
        for card in cards {
            if card.text.trim().is_empty() {
                violations.push(BankViolation::EmptyText {
                    card_id: card.id.clone(),
                });
            }
            if !card.has_valid_points() {
                violations.push(BankViolation::InvalidPoints {
                    card_id: card.id.clone(),
                    points: card.points,
                });
            }

            let count = id_counts.entry(&card.id).or_insert(0);
            *count += 1;
            if *count == 2 {
                violations.push(BankViolation::DuplicateId {
                    card_id: card.id.clone(),
                });
            }
        }

        violations
    }

    /// All cards, in content order.
    #[must_use]
    pub fn cards(&self) -> &[PromptCard] {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&PromptCard> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Cards in one category, in content order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &PromptCard> {
        self.cards.iter().filter(move |c| c.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
