//! Boundary to an external Hecke algebra engine.
//!
//! The engine computes products on its own; an oracle supplies independently
//! obtained answers so the two can be compared.

use crate::closure::{clean_up, Multiplier};
use crate::combination::LinearCombination;
use crate::error::{HeckeError, Result};
use crate::laurent::Laurent;
use crate::types::{Generator, Word};
use log::{info, warn};
use std::collections::HashMap;

/// An independent source of Kazhdan-Lusztig data.
///
/// `cartan` names the Coxeter system the way the external engine does, for
/// example `"B4"`.
pub trait MultiplicationOracle {
    /// `c_s · c_w` in the canonical basis.
    fn multiply(&self, cartan: &str, s: Generator, w: &Word) -> Result<LinearCombination>;

    /// The Kazhdan-Lusztig polynomial `p_{y,w}` in `v`.
    fn kl_polynomial(&self, cartan: &str, y: &Word, w: &Word) -> Result<Laurent>;

    /// `mu(y, w)`, the coefficient of `v^-1` in `p_{y,w}`.
    fn mu_coefficient(&self, cartan: &str, y: &Word, w: &Word) -> Result<i64> {
        Ok(self.kl_polynomial(cartan, y, w)?.coefficient(-1))
    }
}

/// Answers recorded from an earlier run of an external engine.
#[derive(Debug, Clone, Default)]
pub struct RecordedOracle {
    products: HashMap<(String, Generator, Word), LinearCombination>,
    polynomials: HashMap<(String, Word, Word), Laurent>,
}

impl RecordedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `c_s · c_w`. Words of the answer are brought to canonical form,
    /// so answers written with commuting letters swapped compare equal.
    pub fn record_product(
        &mut self,
        cartan: &str,
        s: Generator,
        w: &Word,
        answer: LinearCombination,
    ) {
        self.products
            .insert((cartan.to_string(), s, w.clone()), clean_up(answer));
    }

    pub fn record_polynomial(&mut self, cartan: &str, y: &Word, w: &Word, p: Laurent) {
        self.polynomials
            .insert((cartan.to_string(), y.clone(), w.clone()), p);
    }

    pub fn len(&self) -> usize {
        self.products.len() + self.polynomials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recorded product queries, sorted.
    pub fn product_queries(&self, cartan: &str) -> Vec<(Generator, Word)> {
        let mut queries: Vec<(Generator, Word)> = self
            .products
            .keys()
            .filter(|(c, _, _)| c == cartan)
            .map(|(_, s, w)| (*s, w.clone()))
            .collect();
        queries.sort();
        queries
    }
}

impl MultiplicationOracle for RecordedOracle {
    fn multiply(&self, cartan: &str, s: Generator, w: &Word) -> Result<LinearCombination> {
        self.products
            .get(&(cartan.to_string(), s, w.clone()))
            .cloned()
            .ok_or_else(|| HeckeError::OracleMissing(format!("{} c[{}] * c[{}]", cartan, s, w)))
    }

    fn kl_polynomial(&self, cartan: &str, y: &Word, w: &Word) -> Result<Laurent> {
        self.polynomials
            .get(&(cartan.to_string(), y.clone(), w.clone()))
            .cloned()
            .ok_or_else(|| HeckeError::OracleMissing(format!("{} p[{}, {}]", cartan, y, w)))
    }
}

/// A query on which the engine and the oracle disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub generator: Generator,
    pub word: Word,
    pub expected: LinearCombination,
    pub actual: LinearCombination,
}

/// Runs every query through the engine and the oracle and collects the
/// disagreements. Queries the oracle cannot answer are an error.
pub fn verify_against<O: MultiplicationOracle + ?Sized>(
    multiplier: &Multiplier,
    oracle: &O,
    cartan: &str,
    queries: &[(Generator, Word)],
) -> Result<Vec<Mismatch>> {
    let mut mismatches = Vec::new();

    for (s, w) in queries {
        let expected = oracle.multiply(cartan, *s, w)?;
        let actual = multiplier.multiply(*s, w)?;
        if expected != actual {
            warn!("c[{}] * c[{}]: expected {}, got {}", s, w, expected, actual);
            mismatches.push(Mismatch {
                generator: *s,
                word: w.clone(),
                expected,
                actual,
            });
        }
    }

    info!(
        "verified {} queries against {}: {} mismatches",
        queries.len(),
        cartan,
        mismatches.len()
    );
    Ok(mismatches)
}
