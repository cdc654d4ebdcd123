//! Fixed-length observation encoding of a Limit Hold'em state.
//!
//! The observation is laid out as three consecutive fields:
//!
//! | range                 | field         | encoding                                      |
//! |-----------------------|---------------|-----------------------------------------------|
//! | `[0, 52)`             | public cards  | one slot per card, via [`CardIndexTable`]      |
//! | `[52, 86)`            | hole cards    | two 17-slot halves: 13 rank slots + 4 suit slots |
//! | `[86, 86 + 5 * R)`    | raise history | 5 slots per betting round, one-hot raise count |
//!
//! `R` is the number of reserved betting rounds, fixed when the encoder is
//! built. The vector is allocated once at its full length and written by
//! index, so its length never depends on how much of the hand has been
//! played.

use log::trace;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    actions::ActionSpace,
    card_index::{CardIndexTable, DECK_SIZE},
    errors::{EnvError, Result, SerializationError},
    game::entities::{Action, ActionId, Card},
};

pub const PUBLIC_CARD_SLOTS: usize = DECK_SIZE;
pub const RANK_SLOTS: usize = 13;
pub const SUIT_SLOTS: usize = 4;
pub const HOLE_CARD_SLOTS: usize = RANK_SLOTS + SUIT_SLOTS;
pub const HAND_SLOTS: usize = 2 * HOLE_CARD_SLOTS;
pub const RAISE_SLOTS_PER_ROUND: usize = 5;
pub const MAX_PUBLIC_CARDS: usize = 5;
pub const DEFAULT_MAX_ROUNDS: usize = 4;

pub const HAND_OFFSET: usize = PUBLIC_CARD_SLOTS;
pub const RAISE_OFFSET: usize = HAND_OFFSET + HAND_SLOTS;

/// Length of an observation reserving `max_rounds` betting rounds.
#[must_use]
pub const fn observation_len(max_rounds: usize) -> usize {
    RAISE_OFFSET + RAISE_SLOTS_PER_ROUND * max_rounds
}

/// The acting player's view of the hand, as reported by the engine.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RawState {
    pub legal_actions: Vec<Action>,
    pub hand: Vec<Card>,
    #[serde(default)]
    pub public_cards: Vec<Card>,
    /// Raise count per betting round so far. Counts outside `[0, 5)` are
    /// rejected by the encoder.
    #[serde(default)]
    pub raise_nums: Vec<i64>,
}

/// Fixed-length multi-hot vector handed to the agent.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Observation(Vec<f32>);

impl Observation {
    fn zeroed(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    #[must_use]
    pub fn public_cards(&self) -> &[f32] {
        self.field(0, HAND_OFFSET)
    }

    #[must_use]
    pub fn hand(&self) -> &[f32] {
        self.field(HAND_OFFSET, RAISE_OFFSET)
    }

    #[must_use]
    pub fn raise_history(&self) -> &[f32] {
        self.field(RAISE_OFFSET, self.0.len())
    }

    /// Indices of all set slots, ascending.
    #[must_use]
    pub fn active_slots(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Serialize with the same encoding used for observation records.
    ///
    /// # Errors
    ///
    /// Fails only if bincode cannot encode the vector.
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, SerializationError> {
        Ok(bincode::serde::encode_to_vec(
            self,
            bincode::config::standard(),
        )?)
    }

    /// # Errors
    ///
    /// Fails if `bytes` is not a bincode-encoded observation.
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, SerializationError> {
        let (obs, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(obs)
    }

    fn field(&self, start: usize, end: usize) -> &[f32] {
        self.0.get(start..end).unwrap_or_default()
    }
}

impl AsRef<[f32]> for Observation {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Encoder output for one decision point.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ExtractedState {
    pub obs: Observation,
    /// Legal catalogue ids, in catalogue order.
    pub legal_actions: Vec<ActionId>,
    pub raw_legal_actions: Vec<Action>,
}

/// Turns a [`RawState`] into an [`ExtractedState`].
///
/// Encoding is a pure function of the snapshot and the card table.
#[derive(Clone, Debug)]
pub struct StateEncoder {
    table: Arc<CardIndexTable>,
    max_rounds: usize,
    actions: ActionSpace,
}

impl StateEncoder {
    #[must_use]
    pub fn new(table: Arc<CardIndexTable>) -> Self {
        Self::with_max_rounds(table, DEFAULT_MAX_ROUNDS)
    }

    #[must_use]
    pub fn with_max_rounds(table: Arc<CardIndexTable>, max_rounds: usize) -> Self {
        Self {
            table,
            max_rounds,
            actions: ActionSpace::new(),
        }
    }

    #[must_use]
    pub fn observation_len(&self) -> usize {
        observation_len(self.max_rounds)
    }

    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    #[must_use]
    pub fn table(&self) -> &CardIndexTable {
        &self.table
    }

    /// Encode one snapshot.
    ///
    /// # Errors
    ///
    /// Fails without producing a partial observation if the legal set is
    /// empty, the hand is not exactly two cards, the board holds more than
    /// five cards, a card is unknown to the table or dealt twice, or the
    /// raise history does not fit its reserved slots.
    pub fn encode(&self, state: &RawState) -> Result<ExtractedState> {
        let legal_actions = self.actions.legal_action_ids(&state.legal_actions);
        if legal_actions.is_empty() {
            return Err(EnvError::NoLegalAction);
        }

        let mut obs = Observation::zeroed(self.observation_len());
        let mut dealt = [false; DECK_SIZE];
        self.encode_public_cards(&state.public_cards, &mut dealt, &mut obs)?;
        self.encode_hand(&state.hand, &mut dealt, &mut obs)?;
        self.encode_raises(&state.raise_nums, &mut obs)?;
        trace!(
            "Encoded hand {:?} board {:?} raises {:?} into slots {:?}",
            state.hand,
            state.public_cards,
            state.raise_nums,
            obs.active_slots()
        );

        Ok(ExtractedState {
            obs,
            legal_actions,
            raw_legal_actions: state.legal_actions.clone(),
        })
    }

    /// Table slot of `card`, marking it dealt.
    fn deal(&self, card: &Card, dealt: &mut [bool; DECK_SIZE]) -> Result<usize> {
        let slot = self.table.lookup(card)?;
        if std::mem::replace(&mut dealt[slot], true) {
            return Err(EnvError::DuplicateCard(card.to_string()));
        }
        Ok(slot)
    }

    fn encode_public_cards(
        &self,
        cards: &[Card],
        dealt: &mut [bool; DECK_SIZE],
        obs: &mut Observation,
    ) -> Result<()> {
        if cards.len() > MAX_PUBLIC_CARDS {
            return Err(EnvError::MalformedBoard { len: cards.len() });
        }
        for card in cards {
            let slot = self.deal(card, dealt)?;
            obs.0[slot] = 1.0;
        }
        Ok(())
    }

    fn encode_hand(
        &self,
        hand: &[Card],
        dealt: &mut [bool; DECK_SIZE],
        obs: &mut Observation,
    ) -> Result<()> {
        let [first, second] = hand else {
            return Err(EnvError::MalformedHand { len: hand.len() });
        };
        for (i, card) in [first, second].into_iter().enumerate() {
            self.deal(card, dealt)?;
            let rank_slot = card
                .rank_slot()
                .ok_or_else(|| EnvError::InvalidCard(card.to_string()))?;
            let base = HAND_OFFSET + i * HOLE_CARD_SLOTS;
            obs.0[base + rank_slot] = 1.0;
            obs.0[base + RANK_SLOTS + card.1.offset()] = 1.0;
        }
        Ok(())
    }

    fn encode_raises(&self, raise_nums: &[i64], obs: &mut Observation) -> Result<()> {
        if raise_nums.len() > self.max_rounds {
            return Err(EnvError::TooManyRounds {
                rounds: raise_nums.len(),
                capacity: self.max_rounds,
            });
        }
        for (round, &raises) in raise_nums.iter().enumerate() {
            let slot = usize::try_from(raises)
                .ok()
                .filter(|&n| n < RAISE_SLOTS_PER_ROUND)
                .ok_or(EnvError::RaiseOverflow { round, raises })?;
            obs.0[RAISE_OFFSET + round * RAISE_SLOTS_PER_ROUND + slot] = 1.0;
        }
        Ok(())
    }
}
