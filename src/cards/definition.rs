//! Prompt card definitions.
//!
//! A `PromptCard` is the immutable content of one prompt: its category,
//! the text the clue-giver acts out, and its point value. Cards are
//! loaded once and owned by the `PromptBank`.

use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::core::CardId;

/// Point values a prompt may carry.
pub const VALID_POINTS: std::ops::RangeInclusive<u8> = 1..=3;

/// A single prompt card.
///
/// ```
/// use voice_charades::cards::{Category, PromptCard};
///
/// let card = PromptCard::new("nature-001", Category::Nature, "Thunderstorm", 2);
/// assert!(card.has_valid_points());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptCard {
    pub id: CardId,
    pub category: Category,
    pub text: String,
    /// 1, 2 or 3 once the bank is validated.
    pub points: u8,
}

impl PromptCard {
    #[must_use]
    pub fn new(id: impl Into<CardId>, category: Category, text: impl Into<String>, points: u8) -> Self {
        Self {
            id: id.into(),
            category,
            text: text.into(),
            points,
        }
    }

    #[must_use]
    pub fn has_valid_points(&self) -> bool {
        VALID_POINTS.contains(&self.points)
    }

    /// Text key used for duplicate detection: trimmed and lowercased.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }
}
