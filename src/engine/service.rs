//! Match engine: lifecycle orchestration over the pure resolver.
//!
//! The engine owns the collaborator seams (card catalog, deck source,
//! match store) and runs every per-match operation under that match's
//! lock: load the record, validate, run the resolver on the loaded copy,
//! and persist only if the whole action succeeded. Version-checked
//! persists back the lock up, so a stale write can never clobber a
//! newer record even if another path races the store.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::cards::CardSource;
use crate::core::{GameState, MatchRng, Slot, DECK_SIZE};
use crate::decks::{card_total, expand, DeckId, DeckList, DeckSource, UserId};
use crate::store::{MatchLocks, MatchStore, StoreError, Versioned};

use super::error::EngineError;
use super::record::{MatchId, MatchPhase, MatchRecord, Seat};
use super::resolver::{self, RawTarget};

/// Orchestrates match lifecycle and in-game actions.
///
/// Cheap to share: clone the `Arc`s in, then call from as many threads as
/// needed. Operations on different matches run concurrently; operations
/// on the same match serialize on its lock.
pub struct MatchEngine {
    cards: Arc<dyn CardSource>,
    decks: Arc<dyn DeckSource>,
    store: Arc<dyn MatchStore>,
    locks: MatchLocks,
    rng: Mutex<MatchRng>,
}

impl MatchEngine {
    /// Engine with an entropy-seeded master RNG.
    #[must_use]
    pub fn new(
        cards: Arc<dyn CardSource>,
        decks: Arc<dyn DeckSource>,
        store: Arc<dyn MatchStore>,
    ) -> Self {
        Self::with_rng(cards, decks, store, MatchRng::from_entropy())
    }

    /// Engine with a fixed master seed. Every match forks its own RNG
    /// from this one, so a fixed seed makes whole-match runs replayable.
    #[must_use]
    pub fn with_seed(
        cards: Arc<dyn CardSource>,
        decks: Arc<dyn DeckSource>,
        store: Arc<dyn MatchStore>,
        seed: u64,
    ) -> Self {
        Self::with_rng(cards, decks, store, MatchRng::new(seed))
    }

    fn with_rng(
        cards: Arc<dyn CardSource>,
        decks: Arc<dyn DeckSource>,
        store: Arc<dyn MatchStore>,
        rng: MatchRng,
    ) -> Self {
        Self {
            cards,
            decks,
            store,
            locks: MatchLocks::new(),
            rng: Mutex::new(rng),
        }
    }

    /// Fetch a deck the user may bring to a match.
    ///
    /// The deck must exist, belong to `user`, and expand to exactly
    /// [`DECK_SIZE`] cards.
    fn playable_deck(&self, user: UserId, deck_id: DeckId) -> Result<DeckList, EngineError> {
        let deck = self
            .decks
            .deck(deck_id)?
            .filter(|deck| deck.owner == user)
            .ok_or(EngineError::DeckNotFound)?;

        let total = card_total(&deck.rows);
        if total != DECK_SIZE {
            return Err(EngineError::InvalidDeckSize {
                expected: DECK_SIZE,
                actual: total,
            });
        }
        Ok(deck)
    }

    /// Create a match with `user` seated as p1, waiting for an opponent.
    pub fn create_match(&self, user: UserId, deck_id: DeckId) -> Result<MatchId, EngineError> {
        let deck = self.playable_deck(user, deck_id)?;

        let record = MatchRecord {
            id: MatchId::new(),
            phase: MatchPhase::Lobby {
                p1: Seat {
                    user_id: user,
                    deck_id: deck.id,
                },
            },
        };
        self.store.insert(&record)?;
        info!(match_id = %record.id, user = %user, "match created");
        Ok(record.id)
    }

    /// Join a lobby as p2 and start the game.
    ///
    /// Both decks are expanded and shuffled fresh, opening hands drawn,
    /// and the match flips to ACTIVE with p1 to move.
    pub fn join_match(
        &self,
        user: UserId,
        match_id: MatchId,
        deck_id: DeckId,
    ) -> Result<MatchRecord, EngineError> {
        let lock = self.locks.acquire(match_id);
        let _guard = lock.lock().unwrap();

        let Versioned { version, record } = self
            .store
            .load(match_id)?
            .ok_or(EngineError::MatchNotFound)?;
        let p1 = match record.phase {
            MatchPhase::Lobby { p1 } => p1,
            _ => return Err(EngineError::MatchFull),
        };
        if p1.user_id == user {
            return Err(EngineError::SelfJoin);
        }
        let p2_deck = self.playable_deck(user, deck_id)?;
        let p1_deck = self
            .decks
            .deck(p1.deck_id)?
            .filter(|deck| deck.owner == p1.user_id)
            .ok_or(EngineError::DeckNotFound)?;

        let mut rng = self.rng.lock().unwrap().fork();
        let p1_pile = expand(&p1_deck.rows, &mut rng);
        let p2_pile = expand(&p2_deck.rows, &mut rng);
        let game = GameState::new(p1_pile, p2_pile, &rng);

        let record = MatchRecord {
            id: match_id,
            phase: MatchPhase::Active {
                p1,
                p2: Seat {
                    user_id: user,
                    deck_id: p2_deck.id,
                },
                game,
            },
        };
        self.persist(&record, version)?;
        info!(match_id = %match_id, user = %user, "match started");
        Ok(record)
    }

    /// Read a match record without touching it.
    pub fn match_state(&self, match_id: MatchId) -> Result<MatchRecord, EngineError> {
        Ok(self
            .store
            .load(match_id)?
            .ok_or(EngineError::MatchNotFound)?
            .record)
    }

    /// Play the card at `hand_index` from the acting player's hand.
    pub fn play_card(
        &self,
        match_id: MatchId,
        user: UserId,
        hand_index: usize,
    ) -> Result<MatchRecord, EngineError> {
        self.transition(match_id, user, "playCard", |game, slot| {
            resolver::play_card(game, self.cards.as_ref(), slot, hand_index)
        })
    }

    /// Attack with the minion at `attacker_index` against `target`.
    pub fn attack(
        &self,
        match_id: MatchId,
        user: UserId,
        attacker_index: usize,
        target: Option<RawTarget>,
    ) -> Result<MatchRecord, EngineError> {
        self.transition(match_id, user, "attack", |game, slot| {
            resolver::attack(game, slot, attacker_index, target.as_ref())
        })
    }

    /// End the acting player's turn.
    pub fn end_turn(&self, match_id: MatchId, user: UserId) -> Result<MatchRecord, EngineError> {
        self.transition(match_id, user, "endTurn", resolver::end_turn)
    }

    /// Run one in-game action under the match lock.
    ///
    /// Loads the record, resolves the acting user to a slot, applies `f`
    /// to the loaded game copy, then runs the win check and persists. A
    /// failure anywhere leaves the stored record untouched.
    fn transition(
        &self,
        match_id: MatchId,
        user: UserId,
        action: &'static str,
        f: impl FnOnce(&mut GameState, Slot) -> Result<(), EngineError>,
    ) -> Result<MatchRecord, EngineError> {
        let lock = self.locks.acquire(match_id);
        let _guard = lock.lock().unwrap();

        let Versioned { version, record } = self
            .store
            .load(match_id)?
            .ok_or(EngineError::MatchNotFound)?;
        let (p1, p2, mut game) = match record.phase {
            MatchPhase::Active { p1, p2, game } => (p1, p2, game),
            _ => return Err(EngineError::MatchNotActive),
        };
        let slot = if p1.user_id == user {
            Slot::P1
        } else if p2.user_id == user {
            Slot::P2
        } else {
            return Err(EngineError::NotAPlayer);
        };

        f(&mut game, slot)?;

        let phase = match game.winner_on_lethal() {
            Some(winner) => {
                game.log.push_back(format!("{winner} wins!"));
                info!(match_id = %match_id, winner = %winner, "match ended");
                MatchPhase::Ended {
                    p1,
                    p2,
                    game,
                    winner,
                }
            }
            None => MatchPhase::Active { p1, p2, game },
        };
        let record = MatchRecord {
            id: match_id,
            phase,
        };
        self.persist(&record, version)?;
        debug!(match_id = %match_id, slot = %slot, action, "action applied");
        Ok(record)
    }

    fn persist(&self, record: &MatchRecord, expected_version: u64) -> Result<(), EngineError> {
        self.store.persist(record, expected_version).map_err(|err| {
            if let StoreError::Conflict(id) = &err {
                warn!(match_id = %id, "concurrent write detected, action dropped");
            }
            err.into()
        })
    }
}
