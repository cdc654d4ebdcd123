// Integration tests for state encoding and action decoding scenarios
//
// These follow a single decision point from the engine's raw snapshot to
// the observation an agent sees, and from the agent's action id back to a
// legal move.

use std::{io::Write, sync::Arc};

use lhe_env::{
    Action, ActionSpace, CardIndexTable, EnvError, RawState, StateEncoder,
    encoder::{HAND_OFFSET, RAISE_OFFSET},
};

fn standard_encoder() -> StateEncoder {
    StateEncoder::new(Arc::new(CardIndexTable::standard()))
}

fn cards(ids: &[&str]) -> Vec<lhe_env::Card> {
    ids.iter().map(|id| id.parse().unwrap()).collect()
}

#[test]
fn test_preflop_ten_ace_scenario() {
    let encoder = standard_encoder();
    let state = RawState {
        legal_actions: vec![Action::Fold, Action::Call],
        hand: cards(&["ST", "HA"]),
        public_cards: vec![],
        raise_nums: vec![0],
    };

    let extracted = encoder.encode(&state).unwrap();
    let obs = &extracted.obs;

    // Public-card field is empty preflop
    assert!(obs.public_cards().iter().all(|v| *v == 0.0));

    // Ten of spades: rank slot 9, spade slot 13
    // Ace of hearts: rank slot 17 + 12, heart slot 17 + 13 + 3
    let hand_slots: Vec<_> = obs
        .active_slots()
        .into_iter()
        .filter(|&i| (HAND_OFFSET..RAISE_OFFSET).contains(&i))
        .map(|i| i - HAND_OFFSET)
        .collect();
    assert_eq!(hand_slots, vec![9, 13, 29, 33]);

    // Round 0 with no raises
    let raise_slots: Vec<_> = obs
        .active_slots()
        .into_iter()
        .filter(|&i| i >= RAISE_OFFSET)
        .collect();
    assert_eq!(raise_slots, vec![RAISE_OFFSET]);

    // Catalogue order, not input order
    assert_eq!(
        extracted.legal_actions,
        vec![Action::Call.id(), Action::Fold.id()]
    );
}

#[test]
fn test_river_observation() {
    let encoder = standard_encoder();
    let table = CardIndexTable::standard();
    let board = cards(&["D2", "D7", "CJ", "HQ", "S9"]);
    let state = RawState {
        legal_actions: vec![Action::Call, Action::Raise, Action::Fold],
        hand: cards(&["DK", "DQ"]),
        public_cards: board.clone(),
        raise_nums: vec![1, 0, 2, 4],
    };

    let extracted = encoder.encode(&state).unwrap();
    let obs = &extracted.obs;

    let mut expected_public: Vec<_> = board.iter().map(|c| table.lookup(c).unwrap()).collect();
    expected_public.sort_unstable();
    let public_slots: Vec<_> = obs
        .active_slots()
        .into_iter()
        .filter(|&i| i < HAND_OFFSET)
        .collect();
    assert_eq!(public_slots, expected_public);

    let raise_slots: Vec<_> = obs
        .active_slots()
        .into_iter()
        .filter(|&i| i >= RAISE_OFFSET)
        .map(|i| i - RAISE_OFFSET)
        .collect();
    assert_eq!(raise_slots, vec![1, 5, 12, 19]);
    assert_eq!(obs.len(), 106);
}

#[test]
fn test_encoding_with_table_from_file() {
    let path = std::env::temp_dir().join(format!("lhe_env_card2index_{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(include_bytes!("../data/card2index.json"))
        .unwrap();
    drop(file);

    let table = CardIndexTable::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let encoder = StateEncoder::new(Arc::new(table));
    let state = RawState {
        legal_actions: vec![Action::Check],
        hand: cards(&["C3", "C4"]),
        public_cards: cards(&["CA"]),
        raise_nums: vec![0, 0],
    };
    let extracted = encoder.encode(&state).unwrap();
    assert_eq!(extracted.obs.public_cards()[39], 1.0);
}

#[test]
fn test_unknown_public_card_aborts_encoding() {
    let table = CardIndexTable::from_reader(r#"{"SA": 0, "SK": 12, "H2": 14}"#.as_bytes()).unwrap();
    let encoder = StateEncoder::new(Arc::new(table));
    let state = RawState {
        legal_actions: vec![Action::Check],
        hand: cards(&["SA", "SK"]),
        public_cards: cards(&["H2", "D5"]),
        raise_nums: vec![0],
    };
    let err = encoder.encode(&state).unwrap_err();
    assert!(matches!(err, EnvError::UnknownCard(ref id) if id == "D5"));
}

#[test]
fn test_raise_requested_while_capped() {
    let space = ActionSpace::new();
    assert_eq!(
        space
            .decode(Action::Raise.id(), &[Action::Check, Action::Fold])
            .unwrap(),
        Action::Check
    );
    assert_eq!(
        space.decode(Action::Raise.id(), &[Action::Fold]).unwrap(),
        Action::Fold
    );
}

#[test]
fn test_snapshot_json_to_observation() {
    let json = r#"{
        "legal_actions": ["check", "raise"],
        "hand": ["H5", "C5"],
        "public_cards": ["S5", "DT", "CA"],
        "raise_nums": [2, 0]
    }"#;
    let state: RawState = serde_json::from_str(json).unwrap();
    let extracted = standard_encoder().encode(&state).unwrap();
    assert_eq!(extracted.legal_actions, vec![1, 3]);
    assert_eq!(
        extracted.obs.active_slots().len(),
        3 + 4 + 2,
        "three board cards, four hand slots, two rounds"
    );
}

#[test]
fn test_snapshot_json_with_repeated_board_card() {
    let json = r#"{
        "legal_actions": ["call", "fold"],
        "hand": ["SA", "SA"],
        "public_cards": ["SA", "D2", "D2"],
        "raise_nums": [0, 0]
    }"#;
    let state: RawState = serde_json::from_str(json).unwrap();
    assert!(matches!(
        standard_encoder().encode(&state),
        Err(EnvError::DuplicateCard(_))
    ));
}

#[test]
fn test_snapshot_json_with_out_of_range_raise_count() {
    let json = r#"{
        "legal_actions": ["call", "fold"],
        "hand": ["ST", "HA"],
        "raise_nums": [1, -1]
    }"#;
    let state: RawState = serde_json::from_str(json).unwrap();
    assert!(matches!(
        standard_encoder().encode(&state),
        Err(EnvError::RaiseOverflow { round: 1, raises: -1 })
    ));
}
