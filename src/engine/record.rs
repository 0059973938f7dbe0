//! Match records: lifecycle metadata plus the game snapshot.
//!
//! A match is LOBBY → ACTIVE → ENDED, never backward and never skipping
//! ACTIVE. The phase is a sum type, so a game state only exists once the
//! second player has joined and a winner only once the match is over —
//! there are no nullable fields to keep in sync.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{GameState, Slot};
use crate::decks::{DeckId, UserId};

/// Opaque match identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Allocate a fresh id.
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A seated player: which user, playing which deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub user_id: UserId,
    pub deck_id: DeckId,
}

/// Match lifecycle phase, tagged `status` on the wire
/// (`LOBBY`/`ACTIVE`/`ENDED`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPhase {
    /// Created, waiting for an opponent. No game state exists yet.
    Lobby { p1: Seat },
    /// Both seats filled, game in progress.
    Active { p1: Seat, p2: Seat, game: GameState },
    /// Over. The final game state stays readable; all actions are
    /// rejected.
    Ended {
        p1: Seat,
        p2: Seat,
        game: GameState,
        winner: Slot,
    },
}

impl MatchPhase {
    /// Wire status token.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            MatchPhase::Lobby { .. } => "LOBBY",
            MatchPhase::Active { .. } => "ACTIVE",
            MatchPhase::Ended { .. } => "ENDED",
        }
    }
}

/// The complete persisted state of one match: the unit of load, persist,
/// and broadcast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    #[serde(flatten)]
    pub phase: MatchPhase,
}

impl MatchRecord {
    /// The game snapshot, if one exists yet.
    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        match &self.phase {
            MatchPhase::Lobby { .. } => None,
            MatchPhase::Active { game, .. } | MatchPhase::Ended { game, .. } => Some(game),
        }
    }

    /// The winning slot, once the match has ended.
    #[must_use]
    pub fn winner(&self) -> Option<Slot> {
        match &self.phase {
            MatchPhase::Ended { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}
