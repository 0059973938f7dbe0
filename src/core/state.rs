//! Game state: the per-match snapshot mutated by the action resolver.
//!
//! ## GameState
//!
//! One `GameState` exists per active (or ended) match and holds everything
//! the duel needs: turn counter, acting slot, mana pools, life totals, draw
//! piles, discard piles, hands, boards, the audit log, and the match's own
//! RNG state so mid-match shuffles replay deterministically.
//!
//! The resolver validates every precondition before mutating, so a state
//! that rejects an action is left untouched. Cloning is cheap (the
//! unbounded log is a persistent `im::Vector`), which lets the engine work
//! on a throwaway copy and persist only on success.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::{MatchRng, MatchRngState};
use super::slot::{Slot, SlotMap};
use crate::cards::CardId;

/// Cards a deck must expand to before a match may start.
pub const DECK_SIZE: usize = 10;

/// Life total each player starts with.
pub const STARTING_HP: i32 = 20;

/// Maximum hand size; cards drawn past it are destroyed.
pub const HAND_LIMIT: usize = 7;

/// Cards drawn into the opening hand when the game starts.
pub const OPENING_HAND: usize = 7;

/// Max mana ratchets up to this ceiling, one per own-turn.
pub const MANA_CAP: i32 = 10;

/// A minion in play.
///
/// `atk` and `hp` are mutable instance stats, independent of the card
/// definition's base stats once damage is applied. A minion with hp <= 0 is
/// removed from its board in the same transition that dropped it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Minion {
    /// Definition this instance was summoned from.
    pub card_id: CardId,
    /// Current attack.
    pub atk: i32,
    /// Current health; > 0 while on a board.
    pub hp: i32,
    /// False while suffering summoning sickness.
    pub can_attack: bool,
}

impl Minion {
    /// A freshly summoned minion. It cannot attack until its owner's next
    /// turn begins.
    #[must_use]
    pub fn summon(card_id: CardId, atk: i32, hp: i32) -> Self {
        Self {
            card_id,
            atk,
            hp,
            can_attack: false,
        }
    }
}

/// Per-slot board storage. Boards rarely exceed a handful of minions.
pub type Board = SmallVec<[Minion; 8]>;

/// Complete game state for one match.
///
/// Serializes with the snapshot's wire field names (`maxMana`,
/// `canAttack`, slots as `"p1"`/`"p2"`); the persisted blob is plain JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Turn number, starts at 1 and increments on every end-turn.
    pub turn: u32,
    /// Slot of the player to move.
    pub current: Slot,
    /// Spendable mana; refilled to `max_mana` when that slot's turn begins.
    pub mana: SlotMap<i32>,
    /// Mana ceiling; ratchets up by 1 per own-turn, capped at [`MANA_CAP`].
    pub max_mana: SlotMap<i32>,
    /// Life totals. The match ends the instant either reaches 0 or below.
    pub hp: SlotMap<i32>,
    /// Draw piles; front = next draw.
    pub decks: SlotMap<Vec<CardId>>,
    /// Spent cards, in play order.
    pub discard: SlotMap<Vec<CardId>>,
    /// Held cards; at most [`HAND_LIMIT`].
    pub hands: SlotMap<Vec<CardId>>,
    /// In-play minion instances.
    pub boards: SlotMap<Board>,
    /// Append-only human-readable event log. Never reordered or pruned.
    pub log: Vector<String>,
    /// RNG state for this match's shuffles.
    rng: MatchRngState,
}

impl GameState {
    /// Materialize the initial game state from two freshly expanded,
    /// shuffled decks.
    ///
    /// Each player draws their top [`OPENING_HAND`] cards; p1 moves first
    /// with 1 mana, p2 starts with 0 until their first turn begins.
    #[must_use]
    pub fn new(mut p1_deck: Vec<CardId>, mut p2_deck: Vec<CardId>, rng: &MatchRng) -> Self {
        let p1_hand: Vec<CardId> = p1_deck.drain(..OPENING_HAND.min(p1_deck.len())).collect();
        let p2_hand: Vec<CardId> = p2_deck.drain(..OPENING_HAND.min(p2_deck.len())).collect();

        Self {
            turn: 1,
            current: Slot::P1,
            mana: SlotMap::new(1, 0),
            max_mana: SlotMap::new(1, 0),
            hp: SlotMap::with_value(STARTING_HP),
            decks: SlotMap::new(p1_deck, p2_deck),
            discard: SlotMap::with_value(Vec::new()),
            hands: SlotMap::new(p1_hand, p2_hand),
            boards: SlotMap::with_value(Board::new()),
            log: Vector::new(),
            rng: rng.state(),
        }
    }

    /// Restore this match's RNG. Pair with [`GameState::store_rng`] after
    /// consuming randomness so the snapshot stays deterministic.
    #[must_use]
    pub fn rng(&self) -> MatchRng {
        MatchRng::from_state(&self.rng)
    }

    /// Persist an advanced RNG back into the snapshot.
    pub fn store_rng(&mut self, rng: &MatchRng) {
        self.rng = rng.state();
    }

    /// Draw one card for `slot`.
    ///
    /// An empty deck is first replenished by shuffling the discard pile
    /// back in (logged once per draw that triggers it). If both piles are
    /// empty the draw is silently a no-op. A card drawn while the hand is
    /// full is destroyed rather than returned to the deck.
    pub fn draw_one(&mut self, slot: Slot) {
        if self.decks[slot].is_empty() && !self.discard[slot].is_empty() {
            let mut rng = self.rng();
            let mut pile = std::mem::take(&mut self.discard[slot]);
            rng.shuffle(&mut pile);
            self.decks[slot] = pile;
            self.store_rng(&rng);
            self.log
                .push_back(format!("{slot} recycles discard into deck"));
        }

        if self.decks[slot].is_empty() {
            return;
        }

        let card = self.decks[slot].remove(0);
        if self.hands[slot].len() < HAND_LIMIT {
            self.hands[slot].push(card);
        }
    }

    /// Win check, run after any transition that can change life totals.
    ///
    /// Returns the winning slot if either life total is 0 or below. When
    /// both fall together, p1 is treated as the loser: p2 wins.
    #[must_use]
    pub fn winner_on_lethal(&self) -> Option<Slot> {
        if self.hp[Slot::P1] <= 0 {
            Some(Slot::P2)
        } else if self.hp[Slot::P2] <= 0 {
            Some(Slot::P1)
        } else {
            None
        }
    }
}
