//! Action resolution: the pure game rules.
//!
//! Each function here takes a mutable [`GameState`] plus validated seat
//! context and either applies one complete action or returns an error with
//! the state untouched. All preconditions are checked before the first
//! mutation, so a failed action can never leave a half-applied state
//! behind.
//!
//! The functions know nothing about persistence or locking; the
//! [`MatchEngine`](super::MatchEngine) wraps them with load/persist.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::{CardDefinition, CardKind, CardSource, SpellEffect};
use crate::core::{GameState, Minion, Slot, MANA_CAP};

use super::error::EngineError;

/// Attack target as submitted by a client.
///
/// Kept loose on purpose: the wire carries free-form `{type, index}`
/// objects, and validation happens here rather than at deserialization so
/// a malformed target yields a game error, not a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTarget {
    /// `"FACE"` or `"MINION"`; anything else is rejected.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Opposing board index, required for `"MINION"` targets.
    #[serde(default)]
    pub index: Option<i64>,
}

impl RawTarget {
    /// Target the opponent's face.
    #[must_use]
    pub fn face() -> Self {
        Self {
            kind: Some("FACE".to_string()),
            index: None,
        }
    }

    /// Target the opposing minion at `index`.
    #[must_use]
    pub fn minion(index: i64) -> Self {
        Self {
            kind: Some("MINION".to_string()),
            index: Some(index),
        }
    }
}

/// Reject the action unless it is `slot`'s turn.
pub fn require_turn(game: &GameState, slot: Slot) -> Result<(), EngineError> {
    if game.current == slot {
        Ok(())
    } else {
        Err(EngineError::NotYourTurn)
    }
}

/// Play the card at `hand_index` from `slot`'s hand.
///
/// Validates turn, hand index, card resolution, and mana, in that order.
/// On success the cost is deducted, the card leaves the hand and enters
/// the discard pile, and it resolves: minions are summoned (unable to
/// attack this turn), spells apply their effect immediately.
pub fn play_card(
    game: &mut GameState,
    cards: &dyn CardSource,
    slot: Slot,
    hand_index: usize,
) -> Result<(), EngineError> {
    require_turn(game, slot)?;

    let card_id = *game.hands[slot]
        .get(hand_index)
        .ok_or(EngineError::InvalidHandIndex { index: hand_index })?;
    let card = cards
        .card(card_id)?
        .ok_or(EngineError::CardMissing(card_id))?;
    if card.cost > game.mana[slot] {
        return Err(EngineError::NotEnoughMana {
            cost: card.cost,
            available: game.mana[slot],
        });
    }

    game.mana[slot] -= card.cost;
    game.hands[slot].remove(hand_index);
    game.discard[slot].push(card_id);

    match card.kind {
        CardKind::Minion { attack, health } => {
            game.boards[slot].push(Minion::summon(card_id, attack, health));
            game.log.push_back(format!("{slot} played {}", card.name));
        }
        CardKind::Spell { effect } => resolve_spell(game, slot, &card, effect),
    }
    Ok(())
}

fn resolve_spell(game: &mut GameState, slot: Slot, card: &CardDefinition, effect: SpellEffect) {
    let name = &card.name;
    let opponent = slot.opponent();
    match effect {
        SpellEffect::Damage { amount } => {
            game.hp[opponent] -= amount;
            game.log
                .push_back(format!("{slot} cast {name} for {amount} damage"));
        }
        SpellEffect::Heal { amount } => {
            game.hp[slot] += amount;
            game.log.push_back(format!("{slot} cast {name} heal {amount}"));
        }
        SpellEffect::Draw { amount } => {
            for _ in 0..amount.max(0) {
                game.draw_one(slot);
            }
            game.log.push_back(format!("{slot} cast {name} draw {amount}"));
        }
        SpellEffect::DamageAll { amount } => {
            let board = &mut game.boards[opponent];
            for minion in board.iter_mut() {
                minion.hp -= amount;
            }
            board.retain(|minion| minion.hp > 0);
            game.log
                .push_back(format!("{slot} cast {name} hits all for {amount}"));
        }
        SpellEffect::Drain { amount } => {
            game.hp[opponent] -= amount;
            game.hp[slot] += amount;
            game.log
                .push_back(format!("{slot} cast {name} drain {amount}"));
        }
        SpellEffect::Unknown => {
            warn!(card = %card.id, "unrecognized spell effect, resolving as no-op");
            game.log.push_back(format!("{slot} cast {name}"));
        }
    }
}

/// Attack with the minion at `attacker_index` on `slot`'s board.
///
/// A `FACE` attack is only legal while the opposing board is empty; it
/// deals the attacker's attack to the opponent's life and exhausts the
/// attacker. A `MINION` attack deals simultaneous damage both ways, then
/// sweeps dead minions from both boards.
pub fn attack(
    game: &mut GameState,
    slot: Slot,
    attacker_index: usize,
    target: Option<&RawTarget>,
) -> Result<(), EngineError> {
    require_turn(game, slot)?;

    let kind = target
        .and_then(|t| t.kind.as_deref())
        .ok_or(EngineError::MissingTarget)?;
    let attacker = game.boards[slot]
        .get(attacker_index)
        .ok_or(EngineError::InvalidAttacker {
            index: attacker_index,
        })?;
    if !attacker.can_attack {
        return Err(EngineError::CannotAttack);
    }
    let atk = attacker.atk;
    let opponent = slot.opponent();

    match kind {
        "FACE" => {
            if !game.boards[opponent].is_empty() {
                return Err(EngineError::BlockedByMinions);
            }
            game.hp[opponent] -= atk;
            game.boards[slot][attacker_index].can_attack = false;
            game.log.push_back(format!("{slot} attacks for {atk}"));
        }
        "MINION" => {
            let index = target
                .and_then(|t| t.index)
                .and_then(|i| usize::try_from(i).ok())
                .filter(|&i| i < game.boards[opponent].len())
                .ok_or(EngineError::InvalidTargetIndex)?;

            let (own, theirs) = game.boards.pair_mut(slot);
            let counter = theirs[index].atk;
            theirs[index].hp -= atk;
            own[attacker_index].hp -= counter;
            own[attacker_index].can_attack = false;

            game.boards[slot].retain(|minion| minion.hp > 0);
            game.boards[opponent].retain(|minion| minion.hp > 0);
            game.log
                .push_back(format!("{slot} attacks minion {index} for {atk}"));
        }
        other => return Err(EngineError::UnknownTargetType(other.to_string())),
    }
    Ok(())
}

/// End `slot`'s turn and start the opponent's.
///
/// The incoming player's max mana ratchets up (capped at [`MANA_CAP`]),
/// their pool refills, they draw one card, and their minions shake off
/// summoning sickness.
pub fn end_turn(game: &mut GameState, slot: Slot) -> Result<(), EngineError> {
    require_turn(game, slot)?;

    let next = slot.opponent();
    game.current = next;
    game.turn += 1;
    game.max_mana[next] = (game.max_mana[next] + 1).min(MANA_CAP);
    game.mana[next] = game.max_mana[next];
    game.draw_one(next);
    for minion in game.boards[next].iter_mut() {
        minion.can_attack = true;
    }
    game.log
        .push_back(format!("{slot} ended turn. Now {next}'s turn."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardRegistry};
    use crate::core::MatchRng;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::minion(CardId::new(1), "Boar Rider", 2, 2, 2));
        registry.register(CardDefinition::spell(
            CardId::new(2),
            "Fire Bolt",
            1,
            SpellEffect::Damage { amount: 3 },
        ));
        registry.register(CardDefinition::spell(
            CardId::new(3),
            "Insight",
            2,
            SpellEffect::Draw { amount: 2 },
        ));
        registry.register(CardDefinition::spell(
            CardId::new(4),
            "Hex",
            0,
            SpellEffect::Unknown,
        ));
        registry
    }

    fn fresh_game() -> GameState {
        let deck: Vec<CardId> = std::iter::repeat(CardId::new(2)).take(10).collect();
        GameState::new(deck.clone(), deck, &MatchRng::new(42))
    }

    #[test]
    fn test_play_out_of_turn_rejected() {
        let mut game = fresh_game();
        let err = play_card(&mut game, &registry(), Slot::P2, 0).unwrap_err();
        assert_eq!(err, EngineError::NotYourTurn);
    }

    #[test]
    fn test_play_bad_hand_index_rejected() {
        let mut game = fresh_game();
        let err = play_card(&mut game, &registry(), Slot::P1, 99).unwrap_err();
        assert_eq!(err, EngineError::InvalidHandIndex { index: 99 });
    }

    #[test]
    fn test_play_without_mana_rejected() {
        let mut game = fresh_game();
        game.hands[Slot::P1] = vec![CardId::new(1)];

        let err = play_card(&mut game, &registry(), Slot::P1, 0).unwrap_err();
        assert_eq!(
            err,
            EngineError::NotEnoughMana {
                cost: 2,
                available: 1
            }
        );
        // Rejection leaves the hand alone.
        assert_eq!(game.hands[Slot::P1], vec![CardId::new(1)]);
    }

    #[test]
    fn test_play_minion_summons_sick() {
        let mut game = fresh_game();
        game.hands[Slot::P1] = vec![CardId::new(1)];
        game.mana[Slot::P1] = 2;

        play_card(&mut game, &registry(), Slot::P1, 0).unwrap();

        assert_eq!(game.mana[Slot::P1], 0);
        assert!(game.hands[Slot::P1].is_empty());
        assert_eq!(game.discard[Slot::P1], vec![CardId::new(1)]);
        let minion = &game.boards[Slot::P1][0];
        assert_eq!((minion.atk, minion.hp), (2, 2));
        assert!(!minion.can_attack);
        assert_eq!(game.log.last().unwrap(), "p1 played Boar Rider");
    }

    #[test]
    fn test_play_damage_spell() {
        let mut game = fresh_game();

        play_card(&mut game, &registry(), Slot::P1, 0).unwrap();

        assert_eq!(game.hp[Slot::P2], 17);
        assert_eq!(game.mana[Slot::P1], 0);
        assert_eq!(game.discard[Slot::P1], vec![CardId::new(2)]);
        assert_eq!(game.log.last().unwrap(), "p1 cast Fire Bolt for 3 damage");
    }

    #[test]
    fn test_play_draw_spell_draws_through_the_deck() {
        let mut game = fresh_game();
        game.hands[Slot::P1] = vec![CardId::new(3)];
        game.mana[Slot::P1] = 2;

        play_card(&mut game, &registry(), Slot::P1, 0).unwrap();

        // Drew 2 of the 3 remaining deck cards.
        assert_eq!(game.hands[Slot::P1].len(), 2);
        assert_eq!(game.decks[Slot::P1].len(), 1);
        assert_eq!(game.log.last().unwrap(), "p1 cast Insight draw 2");
    }

    #[test]
    fn test_play_unknown_effect_is_logged_noop() {
        let mut game = fresh_game();
        let before = game.clone();
        game.hands[Slot::P1] = vec![CardId::new(4)];

        play_card(&mut game, &registry(), Slot::P1, 0).unwrap();

        assert_eq!(game.hp, before.hp);
        assert_eq!(game.log.last().unwrap(), "p1 cast Hex");
    }

    #[test]
    fn test_attack_requires_target() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 2,
            hp: 2,
            can_attack: true,
        });

        let err = attack(&mut game, Slot::P1, 0, None).unwrap_err();
        assert_eq!(err, EngineError::MissingTarget);

        let bare = RawTarget::default();
        let err = attack(&mut game, Slot::P1, 0, Some(&bare)).unwrap_err();
        assert_eq!(err, EngineError::MissingTarget);
    }

    #[test]
    fn test_sick_minion_cannot_attack() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion::summon(CardId::new(1), 2, 2));

        let err = attack(&mut game, Slot::P1, 0, Some(&RawTarget::face())).unwrap_err();
        assert_eq!(err, EngineError::CannotAttack);
    }

    #[test]
    fn test_face_attack_blocked_by_minions() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 2,
            hp: 2,
            can_attack: true,
        });
        game.boards[Slot::P2].push(Minion::summon(CardId::new(1), 2, 2));

        let err = attack(&mut game, Slot::P1, 0, Some(&RawTarget::face())).unwrap_err();
        assert_eq!(err, EngineError::BlockedByMinions);
        assert_eq!(game.hp[Slot::P2], 20);
    }

    #[test]
    fn test_face_attack_hits_and_exhausts() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 3,
            hp: 2,
            can_attack: true,
        });

        attack(&mut game, Slot::P1, 0, Some(&RawTarget::face())).unwrap();

        assert_eq!(game.hp[Slot::P2], 17);
        assert!(!game.boards[Slot::P1][0].can_attack);
        assert_eq!(game.log.last().unwrap(), "p1 attacks for 3");

        let err = attack(&mut game, Slot::P1, 0, Some(&RawTarget::face())).unwrap_err();
        assert_eq!(err, EngineError::CannotAttack);
    }

    #[test]
    fn test_minion_combat_is_mutual() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 2,
            hp: 5,
            can_attack: true,
        });
        game.boards[Slot::P2].push(Minion {
            card_id: CardId::new(1),
            atk: 1,
            hp: 4,
            can_attack: false,
        });

        attack(&mut game, Slot::P1, 0, Some(&RawTarget::minion(0))).unwrap();

        assert_eq!(game.boards[Slot::P1][0].hp, 4);
        assert_eq!(game.boards[Slot::P2][0].hp, 2);
        assert!(!game.boards[Slot::P1][0].can_attack);
        assert_eq!(game.log.last().unwrap(), "p1 attacks minion 0 for 2");
    }

    #[test]
    fn test_minion_combat_sweeps_the_dead() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 2,
            hp: 1,
            can_attack: true,
        });
        game.boards[Slot::P2].push(Minion {
            card_id: CardId::new(1),
            atk: 3,
            hp: 2,
            can_attack: false,
        });

        attack(&mut game, Slot::P1, 0, Some(&RawTarget::minion(0))).unwrap();

        assert!(game.boards[Slot::P1].is_empty());
        assert!(game.boards[Slot::P2].is_empty());
    }

    #[test]
    fn test_minion_combat_can_be_one_sided() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 4,
            hp: 5,
            can_attack: true,
        });
        game.boards[Slot::P2].push(Minion {
            card_id: CardId::new(1),
            atk: 1,
            hp: 3,
            can_attack: false,
        });

        attack(&mut game, Slot::P1, 0, Some(&RawTarget::minion(0))).unwrap();

        // Defender dies, attacker shrugs off the counter.
        assert_eq!(game.boards[Slot::P1][0].hp, 4);
        assert!(game.boards[Slot::P2].is_empty());
    }

    #[test]
    fn test_bad_minion_target_index_rejected() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 2,
            hp: 2,
            can_attack: true,
        });

        for target in [
            RawTarget::minion(0),
            RawTarget::minion(-1),
            RawTarget {
                kind: Some("MINION".to_string()),
                index: None,
            },
        ] {
            let err = attack(&mut game, Slot::P1, 0, Some(&target)).unwrap_err();
            assert_eq!(err, EngineError::InvalidTargetIndex);
        }
    }

    #[test]
    fn test_unknown_target_type_rejected() {
        let mut game = fresh_game();
        game.boards[Slot::P1].push(Minion {
            card_id: CardId::new(1),
            atk: 2,
            hp: 2,
            can_attack: true,
        });

        let target = RawTarget {
            kind: Some("HERO_POWER".to_string()),
            index: None,
        };
        let err = attack(&mut game, Slot::P1, 0, Some(&target)).unwrap_err();
        assert_eq!(err, EngineError::UnknownTargetType("HERO_POWER".to_string()));
    }

    #[test]
    fn test_end_turn_hands_over() {
        let mut game = fresh_game();
        game.hands[Slot::P2].truncate(3);
        game.boards[Slot::P2].push(Minion::summon(CardId::new(1), 2, 2));

        end_turn(&mut game, Slot::P1).unwrap();

        assert_eq!(game.current, Slot::P2);
        assert_eq!(game.turn, 2);
        assert_eq!(game.max_mana[Slot::P2], 1);
        assert_eq!(game.mana[Slot::P2], 1);
        assert_eq!(game.hands[Slot::P2].len(), 4);
        assert!(game.boards[Slot::P2][0].can_attack);
        assert_eq!(game.log.last().unwrap(), "p1 ended turn. Now p2's turn.");
    }

    #[test]
    fn test_max_mana_caps_at_ten() {
        let mut game = fresh_game();
        game.max_mana[Slot::P2] = MANA_CAP;

        end_turn(&mut game, Slot::P1).unwrap();

        assert_eq!(game.max_mana[Slot::P2], MANA_CAP);
        assert_eq!(game.mana[Slot::P2], MANA_CAP);
    }

    #[test]
    fn test_end_turn_out_of_turn_rejected() {
        let mut game = fresh_game();
        let err = end_turn(&mut game, Slot::P2).unwrap_err();
        assert_eq!(err, EngineError::NotYourTurn);
        assert_eq!(game.current, Slot::P1);
    }
}
