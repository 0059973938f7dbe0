//! Card catalog lookup.
//!
//! The engine consumes card definitions through the [`CardSource`] seam; a
//! production embedding would back it with the catalog database.
//! [`CardRegistry`] is the in-memory implementation, and
//! [`starter_set`] builds the stock catalog used by tests and demos.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, SpellEffect};
use crate::store::StoreError;

/// Card-lookup-by-id capability.
///
/// Failures are storage failures only: an id that simply is not in the
/// catalog is `Ok(None)`.
pub trait CardSource: Send + Sync {
    /// Look up a card definition.
    fn card(&self, id: CardId) -> Result<Option<CardDefinition>, StoreError>;
}

/// In-memory registry of card definitions.
///
/// ## Example
///
/// ```
/// use duelcore::cards::{CardDefinition, CardId, CardRegistry, SpellEffect};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::spell(
///     CardId::new(1),
///     "Fire Bolt",
///     1,
///     SpellEffect::Damage { amount: 3 },
/// ));
///
/// assert!(registry.contains(CardId::new(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

impl CardSource for CardRegistry {
    fn card(&self, id: CardId) -> Result<Option<CardDefinition>, StoreError> {
        Ok(self.get(id).cloned())
    }
}

/// The stock card catalog: six minions across the mana curve plus one
/// spell per effect kind.
#[must_use]
pub fn starter_set() -> CardRegistry {
    let mut registry = CardRegistry::new();

    registry.register(CardDefinition::minion(CardId::new(1), "Clay Recruit", 1, 1, 2));
    registry.register(CardDefinition::minion(CardId::new(2), "Boar Rider", 2, 2, 2));
    registry.register(CardDefinition::minion(CardId::new(3), "Shield Bearer", 2, 1, 4));
    registry.register(CardDefinition::minion(CardId::new(4), "Grave Prowler", 3, 3, 3));
    registry.register(CardDefinition::minion(CardId::new(5), "Boulder Golem", 4, 3, 6));
    registry.register(CardDefinition::minion(CardId::new(6), "Ember Drake", 5, 5, 4));

    registry.register(CardDefinition::spell(
        CardId::new(7),
        "Fire Bolt",
        1,
        SpellEffect::Damage { amount: 3 },
    ));
    registry.register(CardDefinition::spell(
        CardId::new(8),
        "Healing Light",
        2,
        SpellEffect::Heal { amount: 4 },
    ));
    registry.register(CardDefinition::spell(
        CardId::new(9),
        "Insight",
        2,
        SpellEffect::Draw { amount: 2 },
    ));
    registry.register(CardDefinition::spell(
        CardId::new(10),
        "Flame Wave",
        4,
        SpellEffect::DamageAll { amount: 2 },
    ));
    registry.register(CardDefinition::spell(
        CardId::new(11),
        "Soul Leech",
        3,
        SpellEffect::Drain { amount: 2 },
    ));

    registry
}
