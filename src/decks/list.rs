//! Deck compositions and editing rules.
//!
//! A deck is a named, user-owned list of `(card id, quantity)` rows.
//! Editing enforces only upper bounds (per-card and total copies); the
//! exactly-[`DECK_SIZE`](crate::core::DECK_SIZE) rule applies at match
//! start/join, not at save time, so partially built decks can be saved.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Most copies of a single card a saved deck row may hold.
pub const EDIT_MAX_PER_CARD: u32 = 30;

/// Most cards a saved deck may total. Editing allows up to this bound;
/// match eligibility separately requires exactly
/// [`DECK_SIZE`](crate::core::DECK_SIZE) cards.
pub const EDIT_MAX_TOTAL: u32 = 30;

/// Identifier of a user account, already authenticated upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User({})", self.0)
    }
}

/// Identifier of a saved deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub u64);

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// One composition row: `qty` copies of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckRow {
    pub card_id: CardId,
    pub qty: u32,
}

impl DeckRow {
    #[must_use]
    pub const fn new(card_id: CardId, qty: u32) -> Self {
        Self { card_id, qty }
    }
}

/// A user's saved deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckList {
    pub id: DeckId,
    pub owner: UserId,
    pub name: String,
    pub rows: Vec<DeckRow>,
}

/// A deck composition rejected at save time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeckRulesError {
    #[error("card {card} quantity {qty} exceeds the per-card limit of {limit}")]
    TooManyCopies { card: CardId, qty: u32, limit: u32 },

    #[error("deck cannot exceed {limit} cards (has {total})")]
    TooLarge { total: u32, limit: u32 },
}

/// Validate a composition for saving.
///
/// Zero-quantity rows are dropped rather than stored. Returns the rows
/// that would actually be persisted.
pub fn validate_rows(rows: Vec<DeckRow>) -> Result<Vec<DeckRow>, DeckRulesError> {
    let mut total: u32 = 0;
    for row in &rows {
        if row.qty > EDIT_MAX_PER_CARD {
            return Err(DeckRulesError::TooManyCopies {
                card: row.card_id,
                qty: row.qty,
                limit: EDIT_MAX_PER_CARD,
            });
        }
        total += row.qty;
    }
    if total > EDIT_MAX_TOTAL {
        return Err(DeckRulesError::TooLarge {
            total,
            limit: EDIT_MAX_TOTAL,
        });
    }

    Ok(rows.into_iter().filter(|row| row.qty > 0).collect())
}
