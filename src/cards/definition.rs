//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card as supplied by
//! the catalog: cost, type, and either combat stats (minions) or an effect
//! descriptor (spells). Instance-specific data (damage taken, summoning
//! sickness) lives on the board's [`Minion`](crate::core::Minion) entries.
//!
//! The serde shapes match the catalog's wire format: card type in a `type`
//! tag (`MINION`/`SPELL`) and spell effects as `{"kind": ..., "amount": ...}`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// Identifies the card "type" (e.g. "Fire Bolt"), not a specific copy in a
/// deck or on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A spell's effect descriptor.
///
/// Closed set of effect kinds, dispatched exhaustively by the resolver.
/// Catalog rows carrying a kind this engine does not recognize deserialize
/// to `Unknown` and resolve as a logged no-op rather than an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpellEffect {
    /// Deal `amount` damage to the opponent's face.
    Damage { amount: i32 },
    /// Restore `amount` life to the caster. No upper clamp: life may
    /// exceed its starting value.
    Heal { amount: i32 },
    /// Draw `amount` cards, one at a time through the draw procedure.
    Draw { amount: i32 },
    /// Deal `amount` damage to every opposing minion.
    DamageAll { amount: i32 },
    /// Deal `amount` damage to the opponent's face and restore the same
    /// amount to the caster.
    Drain { amount: i32 },
    /// Unrecognized effect kind; resolves to nothing.
    #[serde(other)]
    Unknown,
}

/// What a card does when played: enter the board or resolve an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    /// Enters the caster's board as a minion with these base stats.
    Minion { attack: i32, health: i32 },
    /// Resolves its effect immediately, then goes to the discard.
    Spell { effect: SpellEffect },
}

/// Static card definition, immutable and externally supplied.
///
/// ## Example
///
/// ```
/// use duelcore::cards::{CardDefinition, CardId, SpellEffect};
///
/// let bolt = CardDefinition::spell(
///     CardId::new(1),
///     "Fire Bolt",
///     1,
///     SpellEffect::Damage { amount: 3 },
/// );
/// assert_eq!(bolt.cost, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card.
    pub id: CardId,
    /// Display name, used verbatim in log entries.
    pub name: String,
    /// Mana cost.
    pub cost: i32,
    /// Minion stats or spell effect.
    #[serde(flatten)]
    pub kind: CardKind,
}

impl CardDefinition {
    /// Define a minion card.
    #[must_use]
    pub fn minion(id: CardId, name: impl Into<String>, cost: i32, attack: i32, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Minion { attack, health },
        }
    }

    /// Define a spell card.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: i32, effect: SpellEffect) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Spell { effect },
        }
    }
}
