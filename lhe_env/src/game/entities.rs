use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::errors::EnvError;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Spade,
    Club,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Spade, Self::Club, Self::Diamond, Self::Heart];

    /// Position of the suit inside a hole card's 4-slot suit block.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::Spade => 0,
            Self::Club => 1,
            Self::Diamond => 2,
            Self::Heart => 3,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Spade => 'S',
            Self::Club => 'C',
            Self::Diamond => 'D',
            Self::Heart => 'H',
        }
    }

    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'S' | 's' => Some(Self::Spade),
            'C' | 'c' => Some(Self::Club),
            'D' | 'd' => Some(Self::Diamond),
            'H' | 'h' => Some(Self::Heart),
            _ => None,
        }
    }
}

/// Placeholder for card values.
pub type Value = u8;

pub const JACK: Value = 11;
pub const QUEEN: Value = 12;
pub const KING: Value = 13;
pub const ACE: Value = 14;

/// A card is a tuple of a uInt8 value (two=2u8 ... ace=14u8) and a suit.
///
/// The textual identifier is the suit letter followed by the rank
/// character, e.g. `SA`, `HT`, `D9`. That is the key format of the
/// card index table.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// Every card of a standard 52-card deck, suit-major.
    pub fn deck() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| (2..=ACE).map(move |value| Card(value, suit)))
    }

    /// Rank value used by the hole-card encoding. Numeric ranks map to
    /// themselves, then J=10, Q=11, K=12, A=13. Ace may be given as 1 or 14.
    #[must_use]
    pub const fn rank_value(&self) -> Option<u8> {
        match self.0 {
            2..=10 => Some(self.0),
            JACK => Some(10),
            QUEEN => Some(11),
            KING => Some(12),
            1 | ACE => Some(13),
            _ => None,
        }
    }

    /// Zero-indexed slot of the rank within a 13-slot rank block.
    ///
    /// Follows [`Card::rank_value`], so ten and jack both land on slot 9 and
    /// slot 0 is never set.
    #[must_use]
    pub const fn rank_slot(&self) -> Option<usize> {
        match self.rank_value() {
            Some(value) => Some(value as usize - 1),
            None => None,
        }
    }

    /// Same card with a low ace (value 1) lifted to [`ACE`].
    #[must_use]
    pub const fn normalized(self) -> Self {
        match self.0 {
            1 => Card(ACE, self.1),
            _ => self,
        }
    }

    #[must_use]
    pub const fn rank_char(&self) -> Option<char> {
        match self.0 {
            2..=9 => Some((b'0' + self.0) as char),
            10 => Some('T'),
            JACK => Some('J'),
            QUEEN => Some('Q'),
            KING => Some('K'),
            1 | ACE => Some('A'),
            _ => None,
        }
    }

    /// Textual identifier, or `None` for a card outside the 52-card domain.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.rank_char()
            .map(|rank| format!("{}{rank}", self.1.letter()))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.rank_char() {
            Some(rank) => write!(f, "{}{rank}", self.1.letter()),
            None => write!(f, "{}?{}", self.1.letter(), self.0),
        }
    }
}

impl FromStr for Card {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EnvError::InvalidCard(s.to_string());
        let mut chars = s.chars();
        let suit = chars.next().and_then(Suit::from_letter).ok_or_else(invalid)?;
        let value = match chars.as_str() {
            "T" | "t" | "10" => 10,
            "J" | "j" => JACK,
            "Q" | "q" => QUEEN,
            "K" | "k" => KING,
            "A" | "a" => ACE,
            rank => match rank.parse::<Value>() {
                Ok(value @ 2..=9) if rank.len() == 1 => value,
                _ => return Err(invalid()),
            },
        };
        Ok(Card(value, suit))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Index into the fixed action catalogue.
pub type ActionId = usize;

/// The fixed, ordered move catalogue. Discriminants are the action ids and
/// must never be reordered.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Call = 0,
    Raise = 1,
    Fold = 2,
    Check = 3,
}

impl Action {
    pub const ALL: [Self; 4] = [Self::Call, Self::Raise, Self::Fold, Self::Check];

    #[must_use]
    pub const fn id(self) -> ActionId {
        self as ActionId
    }

    #[must_use]
    pub const fn from_id(id: ActionId) -> Option<Self> {
        if id < Self::ALL.len() {
            Some(Self::ALL[id])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Raise => "raise",
            Self::Fold => "fold",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Action {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EnvError::UnknownAction(s.to_string()))
    }
}

impl TryFrom<ActionId> for Action {
    type Error = EnvError;

    fn try_from(id: ActionId) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| EnvError::UnknownAction(id.to_string()))
    }
}
