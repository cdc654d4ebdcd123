// Property-based tests for observation encoding and action decoding
//
// These check the layout invariants across randomly dealt hands, boards,
// and betting histories.

use std::{collections::BTreeSet, sync::Arc};

use lhe_env::{
    Action, ActionSpace, Card, CardIndexTable, EnvError, RawState, StateEncoder,
    encoder::{HAND_OFFSET, HOLE_CARD_SLOTS, RAISE_OFFSET, RAISE_SLOTS_PER_ROUND},
};
use proptest::prelude::*;

// Strategy to deal 2 hole cards and a board of 0-5 cards without duplicates
fn deal_strategy() -> impl Strategy<Value = (Vec<Card>, Vec<Card>)> {
    let deck: Vec<Card> = Card::deck().collect();
    (Just(deck).prop_shuffle(), 0usize..=5).prop_map(|(deck, board_len)| {
        let hand = deck[..2].to_vec();
        let board = deck[2..2 + board_len].to_vec();
        (hand, board)
    })
}

fn raise_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..5, 0..=4)
}

fn legal_strategy() -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(prop::sample::select(Action::ALL.to_vec()), 1..=6)
}

fn state_strategy() -> impl Strategy<Value = RawState> {
    (deal_strategy(), raise_strategy(), legal_strategy()).prop_map(
        |((hand, public_cards), raise_nums, legal_actions)| RawState {
            legal_actions,
            hand,
            public_cards,
            raise_nums,
        },
    )
}

fn encoder() -> StateEncoder {
    StateEncoder::new(Arc::new(CardIndexTable::standard()))
}

proptest! {
    #[test]
    fn test_observation_length_is_constant(state in state_strategy()) {
        let encoder = encoder();
        let extracted = encoder.encode(&state).unwrap();
        prop_assert_eq!(extracted.obs.len(), encoder.observation_len());
        prop_assert_eq!(extracted.obs.len(), 106);
    }

    #[test]
    fn test_public_slots_match_table(state in state_strategy()) {
        let table = CardIndexTable::standard();
        let extracted = encoder().encode(&state).unwrap();
        let set: BTreeSet<usize> = extracted
            .obs
            .active_slots()
            .into_iter()
            .filter(|&i| i < HAND_OFFSET)
            .collect();
        let expected: BTreeSet<usize> = state
            .public_cards
            .iter()
            .map(|c| table.lookup(c).unwrap())
            .collect();
        prop_assert_eq!(set.len(), state.public_cards.len());
        prop_assert_eq!(set, expected);
    }

    #[test]
    fn test_hand_sets_two_slots_per_card(state in state_strategy()) {
        let extracted = encoder().encode(&state).unwrap();
        let hand: Vec<usize> = extracted
            .obs
            .active_slots()
            .into_iter()
            .filter(|&i| (HAND_OFFSET..RAISE_OFFSET).contains(&i))
            .map(|i| i - HAND_OFFSET)
            .collect();
        prop_assert_eq!(hand.len(), 4);
        let first = hand.iter().filter(|&&i| i < HOLE_CARD_SLOTS).count();
        let second = hand.iter().filter(|&&i| i >= HOLE_CARD_SLOTS).count();
        prop_assert_eq!(first, 2);
        prop_assert_eq!(second, 2);
    }

    #[test]
    fn test_one_raise_slot_per_round(state in state_strategy()) {
        let extracted = encoder().encode(&state).unwrap();
        let raises = extracted.obs.raise_history();
        for (round, block) in raises.chunks(RAISE_SLOTS_PER_ROUND).enumerate() {
            let set: Vec<usize> = block
                .iter()
                .enumerate()
                .filter(|(_, v)| **v == 1.0)
                .map(|(i, _)| i)
                .collect();
            match state.raise_nums.get(round) {
                Some(&n) => {
                    prop_assert_eq!(set, vec![usize::try_from(n).unwrap()]);
                }
                None => {
                    prop_assert!(set.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_legal_ids_sorted_unique_in_range(state in state_strategy()) {
        let extracted = encoder().encode(&state).unwrap();
        let ids = &extracted.legal_actions;
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ids.iter().all(|&id| id < Action::ALL.len()));
        let expected: BTreeSet<usize> = state.legal_actions.iter().map(|a| a.id()).collect();
        prop_assert_eq!(ids.iter().copied().collect::<BTreeSet<_>>(), expected);
    }

    #[test]
    fn test_redealt_card_is_rejected(
        mut state in state_strategy().prop_filter("board has room", |s| s.public_cards.len() < 5),
        pick in any::<prop::sample::Index>(),
    ) {
        let card = state.hand[pick.index(2)];
        state.public_cards.push(card);
        let result = encoder().encode(&state);
        prop_assert!(matches!(result, Err(EnvError::DuplicateCard(_))));
    }

    #[test]
    fn test_encoding_is_deterministic(state in state_strategy()) {
        let encoder = encoder();
        prop_assert_eq!(encoder.encode(&state).unwrap(), encoder.encode(&state).unwrap());
    }

    #[test]
    fn test_decode_always_legal(
        action_id in 0usize..8,
        legal in legal_strategy().prop_map(|mut legal| {
            // An engine always lets the acting player fold or check.
            legal.push(Action::Fold);
            legal
        })
    ) {
        let action = ActionSpace::new().decode(action_id, &legal).unwrap();
        prop_assert!(legal.contains(&action));
    }

    #[test]
    fn test_decode_keeps_legal_choice(legal in legal_strategy(), pick in any::<prop::sample::Index>()) {
        let wanted = legal[pick.index(legal.len())];
        prop_assert_eq!(ActionSpace::new().decode(wanted.id(), &legal).unwrap(), wanted);
    }
}
