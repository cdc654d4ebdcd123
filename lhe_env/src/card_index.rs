//! Card identifier to public-card slot lookup.
//!
//! The table is loaded once at startup and never mutated afterwards, so it
//! can be shared between encoders behind an `Arc` without locking.

use log::debug;
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{
    errors::{EnvError, Result},
    game::entities::{ACE, Card, Suit},
};

/// Number of distinct cards, and so of public-card slots.
pub const DECK_SIZE: usize = 52;

/// Immutable mapping from a card to a unique slot in `[0, 52)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardIndexTable {
    slots: HashMap<Card, usize>,
}

impl CardIndexTable {
    /// The conventional layout: suit blocks in S, H, D, C order, each block
    /// ordered A, 2..9, T, J, Q, K.
    #[must_use]
    pub fn standard() -> Self {
        let suits = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];
        let ranks = std::iter::once(ACE).chain(2..ACE);
        let slots = suits
            .into_iter()
            .flat_map(|suit| ranks.clone().map(move |value| Card(value, suit)))
            .enumerate()
            .map(|(slot, card)| (card, slot))
            .collect();
        Self { slots }
    }

    /// Load a table from a JSON object mapping card identifiers to slots.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a JSON object of integers, if a key is not
    /// a card identifier, or if a slot is out of range or used twice.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: BTreeMap<String, i64> = serde_json::from_reader(reader)?;
        let mut slots = HashMap::with_capacity(raw.len());
        let mut taken = [false; DECK_SIZE];
        for (id, slot) in raw {
            let card: Card = id
                .parse()
                .map_err(|_| EnvError::MalformedTable(format!("{id:?} is not a card identifier")))?;
            let slot = usize::try_from(slot)
                .ok()
                .filter(|&slot| slot < DECK_SIZE)
                .ok_or_else(|| {
                    EnvError::MalformedTable(format!("slot {slot} for {id} is outside [0, 52)"))
                })?;
            if std::mem::replace(&mut taken[slot], true) {
                return Err(EnvError::MalformedTable(format!(
                    "slot {slot} is assigned to more than one card"
                )));
            }
            slots.insert(card, slot);
        }
        Ok(Self { slots })
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or its contents are malformed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded card index table with {} entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Slot of `card` in `[0, 52)`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnknownCard`] if the card is not in the table.
    pub fn lookup(&self, card: &Card) -> Result<usize> {
        self.slots
            .get(&card.normalized())
            .copied()
            .ok_or_else(|| EnvError::UnknownCard(card.to_string()))
    }

    /// Slot of the card named by a textual identifier such as `"SA"`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnknownCard`] if the identifier does not name a
    /// card in the table.
    pub fn lookup_id(&self, id: &str) -> Result<usize> {
        let card: Card = id
            .parse()
            .map_err(|_| EnvError::UnknownCard(id.to_string()))?;
        self.lookup(&card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for CardIndexTable {
    fn default() -> Self {
        Self::standard()
    }
}
