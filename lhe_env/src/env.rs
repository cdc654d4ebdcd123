//! Agent-facing environment over a [`Game`] engine.

use log::{debug, info};
use std::sync::Arc;

use crate::{
    actions::ActionSpace,
    card_index::CardIndexTable,
    config::EnvConfig,
    encoder::{ExtractedState, RawState, StateEncoder},
    errors::{EnvError, Result},
    game::{
        Game,
        entities::{Action, ActionId},
    },
};

/// Wraps an engine so an agent only ever sees observations and action ids.
#[derive(Debug)]
pub struct LimitHoldemEnv<G> {
    game: G,
    encoder: StateEncoder,
    actions: ActionSpace,
    allow_step_back: bool,
}

impl<G: Game> LimitHoldemEnv<G> {
    /// Build an environment, loading the card table named by the config or
    /// falling back to the standard table.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or the card table cannot be loaded.
    pub fn new(game: G, config: &EnvConfig) -> Result<Self> {
        config.validate()?;
        let table = match &config.card_index_path {
            Some(path) => CardIndexTable::from_path(path)?,
            None => CardIndexTable::standard(),
        };
        Self::with_table(game, Arc::new(table), config)
    }

    /// Build an environment sharing an already loaded card table.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid.
    pub fn with_table(game: G, table: Arc<CardIndexTable>, config: &EnvConfig) -> Result<Self> {
        config.validate()?;
        let encoder = StateEncoder::with_max_rounds(table, config.max_rounds);
        info!(
            "Limit hold'em environment ready: observation length {}, {} actions",
            encoder.observation_len(),
            ActionSpace::CATALOGUE.len()
        );
        Ok(Self {
            game,
            encoder,
            actions: ActionSpace::new(),
            allow_step_back: config.allow_step_back,
        })
    }

    #[must_use]
    pub fn state_shape(&self) -> [usize; 1] {
        [self.encoder.observation_len()]
    }

    #[must_use]
    pub fn action_num(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn encoder(&self) -> &StateEncoder {
        &self.encoder
    }

    #[must_use]
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.actions.legal_actions(&self.game)
    }

    /// Encode an arbitrary snapshot.
    ///
    /// # Errors
    ///
    /// See [`StateEncoder::encode`].
    pub fn extract_state(&self, state: &RawState) -> Result<ExtractedState> {
        self.encoder.encode(state)
    }

    /// Encode the engine's current snapshot.
    ///
    /// # Errors
    ///
    /// See [`StateEncoder::encode`].
    pub fn current_state(&self) -> Result<ExtractedState> {
        self.extract_state(&self.game.state())
    }

    #[must_use]
    pub fn payoffs(&self) -> Vec<f64> {
        self.game.payoffs()
    }

    /// Resolve an action id against the engine's current legal moves.
    ///
    /// # Errors
    ///
    /// See [`ActionSpace::decode`].
    pub fn decode_action(&self, action_id: ActionId) -> Result<Action> {
        self.actions.decode(action_id, &self.legal_actions())
    }

    /// Apply the agent's action and return the next decision point, or
    /// `None` once the hand is over.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::GameOver`] if the hand had already finished, or
    /// any decoding or encoding error.
    pub fn step(&mut self, action_id: ActionId) -> Result<Option<ExtractedState>> {
        if self.game.is_over() {
            return Err(EnvError::GameOver);
        }
        let action = self.decode_action(action_id)?;
        debug!("Applying {action} for action id {action_id}");
        self.game.apply(action);
        if self.game.is_over() {
            return Ok(None);
        }
        self.current_state().map(Some)
    }

    /// Rewind the engine by one move.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::StepBackDisabled`] unless the environment was
    /// configured with `allow_step_back`.
    pub fn step_back(&mut self) -> Result<bool> {
        if !self.allow_step_back {
            return Err(EnvError::StepBackDisabled);
        }
        Ok(self.game.step_back())
    }
}
