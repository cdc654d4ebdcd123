//! Mapping between agent action ids and legal moves.

use log::debug;

use crate::{
    errors::{EnvError, Result},
    game::{
        Game,
        entities::{Action, ActionId},
    },
};

/// Stateless view over the fixed catalogue `[call, raise, fold, check]`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ActionSpace;

impl ActionSpace {
    pub const CATALOGUE: [Action; 4] = Action::ALL;

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Number of action ids an agent can emit.
    #[must_use]
    pub const fn len(&self) -> usize {
        Self::CATALOGUE.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        Self::CATALOGUE.is_empty()
    }

    /// The engine's current legal moves, unmodified.
    pub fn legal_actions<G: Game + ?Sized>(&self, game: &G) -> Vec<Action> {
        game.legal_actions()
    }

    /// Catalogue ids of `legal`, in catalogue order and without duplicates.
    #[must_use]
    pub fn legal_action_ids(&self, legal: &[Action]) -> Vec<ActionId> {
        let mut mask = [false; Action::ALL.len()];
        for action in legal {
            mask[action.id()] = true;
        }
        Self::CATALOGUE
            .into_iter()
            .filter(|action| mask[action.id()])
            .map(Action::id)
            .collect()
    }

    /// Resolve an agent's action id to a move in `legal`.
    ///
    /// An illegal or out-of-catalogue id falls back to `check`, then `fold`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NoLegalAction`] if neither the requested move nor
    /// either fallback is legal.
    pub fn decode(&self, action_id: ActionId, legal: &[Action]) -> Result<Action> {
        if let Some(action) = Action::from_id(action_id).filter(|a| legal.contains(a)) {
            return Ok(action);
        }
        let fallback = [Action::Check, Action::Fold]
            .into_iter()
            .find(|a| legal.contains(a))
            .ok_or(EnvError::NoLegalAction)?;
        debug!("Action id {action_id} is not legal in {legal:?}, falling back to {fallback}");
        Ok(fallback)
    }
}
