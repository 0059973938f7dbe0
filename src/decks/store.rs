//! Deck persistence seam and in-memory implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::list::{validate_rows, DeckId, DeckList, DeckRow, DeckRulesError, UserId};
use crate::store::StoreError;

/// Deck-cards-by-deck-id capability consumed by the match engine.
pub trait DeckSource: Send + Sync {
    /// Fetch a deck with its composition rows, or `None` if it does not
    /// exist.
    fn deck(&self, id: DeckId) -> Result<Option<DeckList>, StoreError>;
}

/// A deck save rejected by the deck store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeckSaveError {
    /// No deck with that id owned by the requesting user.
    #[error("deck not found")]
    NotFound,

    /// Composition violates the editing bounds.
    #[error(transparent)]
    Rules(#[from] DeckRulesError),
}

/// In-memory [`DeckSource`] with the editing rules of the deck routes.
#[derive(Debug, Default)]
pub struct MemoryDecks {
    decks: Mutex<FxHashMap<DeckId, DeckList>>,
    next_id: AtomicU64,
}

impl MemoryDecks {
    /// Create an empty deck store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            decks: Mutex::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create an empty deck for a user.
    pub fn create(&self, owner: UserId, name: impl Into<String>) -> DeckId {
        let id = DeckId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.decks.lock().unwrap().insert(
            id,
            DeckList {
                id,
                owner,
                name: name.into(),
                rows: Vec::new(),
            },
        );
        id
    }

    /// Replace a deck's composition.
    ///
    /// Only the owner may save; the composition is validated against the
    /// editing bounds and zero-quantity rows are dropped.
    pub fn save_cards(
        &self,
        owner: UserId,
        id: DeckId,
        rows: Vec<DeckRow>,
    ) -> Result<(), DeckSaveError> {
        let mut decks = self.decks.lock().unwrap();
        let deck = decks
            .get_mut(&id)
            .filter(|deck| deck.owner == owner)
            .ok_or(DeckSaveError::NotFound)?;

        deck.rows = validate_rows(rows)?;
        Ok(())
    }
}

impl DeckSource for MemoryDecks {
    fn deck(&self, id: DeckId) -> Result<Option<DeckList>, StoreError> {
        Ok(self.decks.lock().unwrap().get(&id).cloned())
    }
}
