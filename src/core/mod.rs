//! Core match-state types: slots, deterministic RNG, and the game snapshot.
//!
//! These are the building blocks the action resolver operates on; nothing
//! here talks to storage or knows about match lifecycle.

pub mod rng;
pub mod slot;
pub mod state;

pub use rng::{MatchRng, MatchRngState};
pub use slot::{Slot, SlotMap};
pub use state::{
    Board, GameState, Minion, DECK_SIZE, HAND_LIMIT, MANA_CAP, OPENING_HAND, STARTING_HP,
};
