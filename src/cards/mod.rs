//! Prompt content: categories, cards, the validated bank, and decks.
//!
//! ## Key Types
//!
//! - `Category` / `DieFace`: the five categories and the six-faced die
//! - `CategoryMap`: one value per category
//! - `PromptCard`: immutable prompt content
//! - `PromptBank`: validated catalog, the only entry point for content
//! - `DeckState`: seeded per-category draw order with wrap-around cursors

pub mod category;
pub mod deck;
pub mod definition;
pub mod registry;

pub use category::{Category, CategoryMap, DieFace};
pub use deck::DeckState;
pub use definition::{PromptCard, VALID_POINTS};
pub use registry::PromptBank;
