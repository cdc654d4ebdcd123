//! Agents that pick an action id from an encoded decision point.

use lhe_env::{ActionId, ExtractedState};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

pub trait Agent {
    /// Choose an action id, or `None` if the state offers no legal id.
    fn step(&mut self, state: &ExtractedState) -> Option<ActionId>;
}

/// Picks uniformly among the legal action ids.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn step(&mut self, state: &ExtractedState) -> Option<ActionId> {
        state.legal_actions.choose(&mut self.rng).copied()
    }
}

/// Always emits the same id, legal or not.
pub struct FixedAgent(pub ActionId);

impl Agent for FixedAgent {
    fn step(&mut self, _state: &ExtractedState) -> Option<ActionId> {
        Some(self.0)
    }
}
