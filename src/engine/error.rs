//! Domain error taxonomy for the match engine.
//!
//! Every failure is synchronous, carries a short human-readable message,
//! and aborts the action with no partial mutation. Failures are surfaced
//! to the acting client only; the caller may resubmit. Storage failures
//! wrap [`StoreError`] and propagate unchanged.

use crate::cards::CardId;
use crate::store::StoreError;

/// A rejected engine operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The named deck does not exist or is not owned by the requesting
    /// user.
    #[error("deck not found")]
    DeckNotFound,

    /// The deck does not expand to a playable size.
    #[error("deck must contain exactly {expected} cards to play (has {actual})")]
    InvalidDeckSize { expected: usize, actual: usize },

    #[error("match not found")]
    MatchNotFound,

    /// The second seat is already taken (or the match is already over).
    #[error("match already full")]
    MatchFull,

    #[error("you cannot join your own match")]
    SelfJoin,

    /// The match is not accepting actions: still in the lobby, or ended.
    #[error("match not active")]
    MatchNotActive,

    #[error("not a player in this match")]
    NotAPlayer,

    #[error("not your turn")]
    NotYourTurn,

    #[error("invalid hand index {index}")]
    InvalidHandIndex { index: usize },

    #[error("not enough mana: need {cost}, have {available}")]
    NotEnoughMana { cost: i32, available: i32 },

    /// A hand or deck references a card the catalog cannot resolve.
    /// Collaborator data corruption, not a player mistake.
    #[error("card {0} is missing from the catalog")]
    CardMissing(CardId),

    #[error("attack requires a target")]
    MissingTarget,

    #[error("no minion at attacker index {index}")]
    InvalidAttacker { index: usize },

    #[error("this minion cannot attack yet")]
    CannotAttack,

    /// Face attacks require the opposing board to be cleared first.
    #[error("enemy minions are blocking the face")]
    BlockedByMinions,

    #[error("invalid target index")]
    InvalidTargetIndex,

    #[error("unknown target type {0:?}")]
    UnknownTargetType(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(EngineError::NotYourTurn.to_string(), "not your turn");
        assert_eq!(
            EngineError::InvalidDeckSize {
                expected: 10,
                actual: 7
            }
            .to_string(),
            "deck must contain exactly 10 cards to play (has 7)"
        );
        assert_eq!(
            EngineError::NotEnoughMana {
                cost: 4,
                available: 2
            }
            .to_string(),
            "not enough mana: need 4, have 2"
        );
    }

    #[test]
    fn test_storage_errors_pass_through() {
        let err: EngineError = StoreError::Backend("connection reset".into()).into();
        assert_eq!(err.to_string(), "storage failure: connection reset");
    }
}
