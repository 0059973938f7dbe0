//! Match lifecycle and action orchestration.
//!
//! ## Layers
//!
//! - [`record`]: the persisted match record and its lifecycle phases.
//! - [`resolver`]: pure game-rule transitions over a [`GameState`]
//!   (play, attack, end turn).
//! - [`service`]: [`MatchEngine`], which wires the resolver to the card
//!   catalog, deck source, and match store, with per-match locking.
//!
//! [`GameState`]: crate::core::GameState

pub mod error;
pub mod record;
pub mod resolver;
pub mod service;

pub use error::EngineError;
pub use record::{MatchId, MatchPhase, MatchRecord, Seat};
pub use resolver::RawTarget;
pub use service::MatchEngine;
