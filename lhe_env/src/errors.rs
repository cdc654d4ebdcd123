//! Error types for encoding, decoding, and persistence.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced while encoding a state or decoding an action.
///
/// Every variant is a local validation failure that reflects an upstream
/// engine or resource defect. None of them are retryable.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Card is not present in the card index table
    #[error("Unknown card: {0} is not in the card index table")]
    UnknownCard(String),

    /// Textual identifier does not name a card
    #[error("Invalid card identifier: {0:?}")]
    InvalidCard(String),

    /// Move name or id outside the action catalogue
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Wrong number of hole cards
    #[error("Malformed hand: expected 2 hole cards, got {len}")]
    MalformedHand { len: usize },

    /// More public cards than a board can hold
    #[error("Malformed board: expected at most 5 public cards, got {len}")]
    MalformedBoard { len: usize },

    /// Raise count outside the reserved per-round slots
    #[error("Raise overflow in round {round}: {raises} raises does not fit the 5 reserved slots")]
    RaiseOverflow { round: usize, raises: i64 },

    /// Same card dealt twice across hand and board
    #[error("Duplicate card: {0} appears more than once in hand and board")]
    DuplicateCard(String),

    /// More betting rounds than the observation reserves
    #[error("Too many betting rounds: {rounds} supplied, {capacity} reserved")]
    TooManyRounds { rounds: usize, capacity: usize },

    /// Neither the requested action nor any fallback is legal
    #[error("No legal action available")]
    NoLegalAction,

    /// Card index resource has a bad key or value
    #[error("Malformed card index table: {0}")]
    MalformedTable(String),

    /// Card index resource could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Card index resource is not valid JSON of the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid environment configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Step back requested but not enabled
    #[error("Step back is disabled for this environment")]
    StepBackDisabled,

    /// Action submitted after the hand finished
    #[error("Game is over")]
    GameOver,
}

/// Result type for environment operations
pub type Result<T> = std::result::Result<T, EnvError>;

/// Errors that can occur while persisting or loading observations
#[derive(Debug, Error)]
pub enum SerializationError {
    /// Failed to encode a record
    #[error("Failed to encode record: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Failed to decode a record
    #[error("Failed to decode record: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Underlying reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record size exceeded maximum allowed
    #[error("Record size {actual} exceeds maximum {max}")]
    RecordTooLarge { actual: usize, max: usize },

    /// Decoded observation does not have the expected length
    #[error("Observation length {actual} does not match expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
