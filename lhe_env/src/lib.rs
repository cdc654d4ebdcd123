//! # LHE Env
//!
//! Limit Hold'em state encoding and action decoding for learning agents.
//!
//! The crate sits between a poker engine and an agent. In one direction it
//! turns the acting player's view of a hand into a fixed-length numeric
//! observation; in the other it turns the agent's integer action choice
//! back into a move the engine will accept.
//!
//! ## Core Modules
//!
//! - [`card_index`]: card identifier to public-card slot lookup
//! - [`actions`]: the fixed `[call, raise, fold, check]` catalogue and safe decoding
//! - [`encoder`]: raw state snapshot to observation
//! - [`env`]: environment facade over a [`Game`] engine
//! - [`codec`]: length-prefixed binary observation records
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use lhe_env::{Action, CardIndexTable, RawState, StateEncoder};
//!
//! let encoder = StateEncoder::new(Arc::new(CardIndexTable::standard()));
//! let state = RawState {
//!     legal_actions: vec![Action::Call, Action::Fold],
//!     hand: vec!["ST".parse().unwrap(), "HA".parse().unwrap()],
//!     public_cards: vec![],
//!     raise_nums: vec![0],
//! };
//!
//! let extracted = encoder.encode(&state).unwrap();
//! assert_eq!(extracted.obs.len(), 106);
//! assert_eq!(extracted.legal_actions, vec![0, 2]);
//! ```

pub mod actions;
pub mod card_index;
pub mod codec;
pub mod config;
pub mod encoder;
pub mod env;
pub mod errors;

/// Engine collaborator trait and card/action entities.
pub mod game;

pub use actions::ActionSpace;
pub use card_index::CardIndexTable;
pub use config::{ConfigError, EnvConfig};
pub use encoder::{ExtractedState, Observation, RawState, StateEncoder};
pub use env::LimitHoldemEnv;
pub use errors::{EnvError, Result, SerializationError};
pub use game::{
    Game,
    entities::{Action, ActionId, Card, Suit},
};
