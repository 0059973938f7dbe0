//! Deck compositions, editing rules, and expansion into draw piles.
//!
//! Decks are user-owned lists of `(card id, quantity)` rows. Saving
//! enforces only upper bounds; the exact playable size is checked when a
//! match starts. [`expand`] turns a composition into the shuffled pile a
//! game actually draws from.

pub mod expand;
pub mod list;
pub mod store;

pub use expand::{card_total, expand};
pub use list::{
    validate_rows, DeckId, DeckList, DeckRow, DeckRulesError, UserId, EDIT_MAX_PER_CARD,
    EDIT_MAX_TOTAL,
};
pub use store::{DeckSaveError, DeckSource, MemoryDecks};
