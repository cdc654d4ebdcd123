//! Game engine collaborator interface and card/action entities.
//!
//! The environment never implements poker rules itself. Anything that can
//! report the acting player's view, the legal moves, and the payoffs can
//! drive it through [`Game`].

pub mod entities;

use crate::encoder::RawState;
use entities::Action;

/// The engine side of the environment.
pub trait Game {
    /// Moves the engine currently permits for the acting player.
    fn legal_actions(&self) -> Vec<Action>;

    /// Apply a legal move for the acting player.
    fn apply(&mut self, action: Action);

    /// Per-player result of a finished hand.
    fn payoffs(&self) -> Vec<f64>;

    /// Snapshot of the acting player's view of the hand.
    fn state(&self) -> RawState;

    fn is_over(&self) -> bool;

    /// Undo the last applied move. Returns `false` if there is nothing to
    /// undo or the engine keeps no history.
    fn step_back(&mut self) -> bool {
        false
    }
}
