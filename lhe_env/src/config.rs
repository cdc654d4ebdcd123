//! Environment configuration.
//!
//! Values come from the process environment, with defaults for anything
//! absent or unparsable. Command-line tools override individual fields.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::encoder::DEFAULT_MAX_ROUNDS;

/// Largest supported number of reserved betting rounds.
pub const MAX_SUPPORTED_ROUNDS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Card index JSON file. The built-in standard table is used when unset.
    pub card_index_path: Option<PathBuf>,

    /// Whether `step_back` is allowed
    pub allow_step_back: bool,

    /// Betting rounds reserved in the raise-history field (default: 4)
    pub max_rounds: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            card_index_path: None,
            allow_step_back: false,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl EnvConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `LHE_CARD_INDEX_PATH`: card index JSON file (default: built-in table)
    /// - `LHE_ALLOW_STEP_BACK`: `true` or `false` (default: false)
    /// - `LHE_MAX_ROUNDS`: reserved betting rounds (default: 4)
    pub fn from_env() -> Self {
        Self {
            card_index_path: std::env::var_os("LHE_CARD_INDEX_PATH").map(PathBuf::from),
            allow_step_back: parse_env_or("LHE_ALLOW_STEP_BACK", false),
            max_rounds: parse_env_or("LHE_MAX_ROUNDS", DEFAULT_MAX_ROUNDS),
        }
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `max_rounds` is 0 or larger than
    /// [`MAX_SUPPORTED_ROUNDS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::Invalid {
                var: "LHE_MAX_ROUNDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.max_rounds > MAX_SUPPORTED_ROUNDS {
            return Err(ConfigError::Invalid {
                var: "LHE_MAX_ROUNDS".to_string(),
                reason: format!("Must be at most {MAX_SUPPORTED_ROUNDS}"),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
