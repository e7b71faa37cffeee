//! Engine configuration

use crate::error::{HeckeError, Result};
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Rank of the fixed Coxeter system
    pub const RANK: u8 = 4;

    /// Largest rank whose words still have a digit encoding
    pub const MAX_RANK: u8 = 9;

    /// Worklist pops allowed for a single product
    pub const MAX_STEPS: usize = 1_000_000;
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Generators `1..=rank` are used by the closure graph
    pub rank: u8,
    /// Upper bound on worklist pops per product
    pub max_steps: usize,
    /// Expand the generators of one graph vertex on the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rank: defaults::RANK,
            max_steps: defaults::MAX_STEPS,
            parallel: false,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rank == 0 || self.rank > defaults::MAX_RANK {
            return Err(HeckeError::InvalidConfig(format!(
                "rank must be in 1..={}, got {}",
                defaults::MAX_RANK,
                self.rank
            )));
        }

        if self.max_steps == 0 {
            return Err(HeckeError::InvalidConfig(
                "max_steps must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    pub fn with_rank(mut self, rank: u8) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.rank, 4);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(EngineConfig::default().with_rank(0).validate().is_err());
        assert!(EngineConfig::default().with_rank(10).validate().is_err());
        assert!(EngineConfig::default().with_max_steps(0).validate().is_err());
    }
}
