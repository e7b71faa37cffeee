//! Products of Kazhdan-Lusztig basis elements indexed by fully commutative
//! elements of a rank-4 Coxeter system with a {1, 2} edge of order 4.

pub mod closure;
pub mod combination;
pub mod config;
pub mod error;
pub mod factors;
pub mod graph;
pub mod justify;
pub mod laurent;
pub mod oracle;
pub mod representation;
pub mod step;
pub mod types;
pub mod word_ops;

pub use closure::{clean_up, multiply, Multiplier};
pub use combination::LinearCombination;
pub use config::EngineConfig;
pub use error::{HeckeError, Result};
pub use factors::{canonical_factors, expand, literal};
pub use graph::{descendants, ClosureGraph};
pub use justify::{canonical, extract_parabolic, flatten, left_justify, right_justify};
pub use laurent::Laurent;
pub use oracle::{verify_against, Mismatch, MultiplicationOracle, RecordedOracle};
pub use representation::{sample_point, HeckeModule, MatrixSummary};
pub use step::{classify, step, StepCase, StepTerm};
pub use types::{braid_order, CompositeFactor, Factor, Generator, Word};
