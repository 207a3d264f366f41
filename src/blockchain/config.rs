use serde::Deserialize;

use super::chain::LedgerError;

/// Number of hex characters in a SHA-256 digest
const MAX_DIFFICULTY: usize = 64;

/// Tunables for a ledger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Number of leading '0' hex characters a proof hash must start with
    pub difficulty: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { difficulty: 4 }
    }
}

impl LedgerConfig {
    /// Creates a config with the given difficulty
    pub fn with_difficulty(difficulty: usize) -> Self {
        Self { difficulty }
    }

    /// Checks that the difficulty can be satisfied by a hex digest
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.difficulty == 0 || self.difficulty > MAX_DIFFICULTY {
            return Err(LedgerError::InvalidConfig(format!(
                "difficulty must be between 1 and {}, got {}",
                MAX_DIFFICULTY, self.difficulty
            )));
        }

        Ok(())
    }
}
