//! Deck expansion: composition rows to a shuffled draw pile.

use crate::cards::CardId;
use crate::core::MatchRng;

use super::list::DeckRow;

/// Total number of cards a composition expands to.
#[must_use]
pub fn card_total(rows: &[DeckRow]) -> usize {
    rows.iter().map(|row| row.qty as usize).sum()
}

/// Expand composition rows into individual card instances and shuffle.
///
/// Each row contributes `qty` copies of its card id; the result is a
/// uniform permutation of exactly [`card_total`] elements. Empty input
/// yields an empty pile; eligibility is the caller's concern.
#[must_use]
pub fn expand(rows: &[DeckRow], rng: &mut MatchRng) -> Vec<CardId> {
    let mut pile = Vec::with_capacity(card_total(rows));
    for row in rows {
        pile.extend(std::iter::repeat(row.card_id).take(row.qty as usize));
    }
    rng.shuffle(&mut pile);
    pile
}
