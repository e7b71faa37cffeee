//! Error types for the engine

use crate::types::{Generator, Word};
use thiserror::Error;

/// Errors raised by the multiplication engine.
///
/// Malformed words are not detected here: they are a caller precondition and
/// produce meaningless but finite output.
#[derive(Debug, Error)]
pub enum HeckeError {
    /// The worklist did not drain within the configured number of steps
    #[error("product c[{prefix}] * c[{word}] not resolved after {steps} steps")]
    StepBudgetExceeded {
        prefix: Word,
        word: Word,
        steps: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// A generator id outside `1..=rank`
    #[error("generator {generator} out of range for rank {rank}")]
    GeneratorOutOfRange { generator: Generator, rank: u8 },

    /// A product left the basis a module was built on
    #[error("c[{generator}] * c[{word}] has a term outside the basis: {outside}")]
    BasisNotClosed {
        generator: Generator,
        word: Word,
        outside: Word,
    },

    /// The oracle has no answer for a query
    #[error("oracle has no answer for {0}")]
    OracleMissing(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, HeckeError>;
