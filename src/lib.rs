//! duelcore - a server-side engine for a two-player dueling card game.
//!
//! Players bring 10-card decks, draw opening hands of 7, and alternate
//! turns playing minions and spells until one life total hits zero. The
//! engine is authoritative: clients submit intents (play this hand index,
//! attack with this minion, end turn) and the engine validates, resolves,
//! and persists every transition.
//!
//! ## Architecture
//!
//! - [`core`]: slots, deterministic RNG, and the [`GameState`] snapshot.
//! - [`cards`]: immutable card definitions and the catalog lookup seam.
//! - [`decks`]: user deck compositions, editing rules, and expansion
//!   into shuffled draw piles.
//! - [`store`]: match-record persistence with per-match locking and
//!   version-checked writes.
//! - [`engine`]: the [`MatchEngine`] orchestrator and the pure action
//!   resolver underneath it.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use duelcore::cards::{starter_set, CardId};
//! use duelcore::decks::{DeckRow, MemoryDecks, UserId};
//! use duelcore::engine::MatchEngine;
//! use duelcore::store::MemoryStore;
//!
//! let decks = Arc::new(MemoryDecks::new());
//! let engine = MatchEngine::with_seed(
//!     Arc::new(starter_set()),
//!     decks.clone(),
//!     Arc::new(MemoryStore::new()),
//!     42,
//! );
//!
//! // Two users each build a 10-card deck.
//! let rows = vec![
//!     DeckRow::new(CardId::new(1), 5),
//!     DeckRow::new(CardId::new(7), 5),
//! ];
//! let d1 = decks.create(UserId(1), "Starter");
//! decks.save_cards(UserId(1), d1, rows.clone()).unwrap();
//! let d2 = decks.create(UserId(2), "Starter");
//! decks.save_cards(UserId(2), d2, rows).unwrap();
//!
//! // Create, join, and take the first action.
//! let id = engine.create_match(UserId(1), d1).unwrap();
//! engine.join_match(UserId(2), id, d2).unwrap();
//! let record = engine.end_turn(id, UserId(1)).unwrap();
//! assert_eq!(record.phase.status(), "ACTIVE");
//! ```
//!
//! [`GameState`]: core::GameState
//! [`MatchEngine`]: engine::MatchEngine

pub mod cards;
pub mod core;
pub mod decks;
pub mod engine;
pub mod store;

pub use engine::{EngineError, MatchEngine, MatchId, RawTarget};
