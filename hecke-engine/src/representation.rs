use crate::closure::Multiplier;
use crate::config::defaults;
use crate::error::{HeckeError, Result};
use crate::graph::ClosureGraph;
use crate::laurent::Laurent;
use crate::types::{Generator, Word};
use log::debug;
use nalgebra::DMatrix;
use num_complex::Complex;
use num_traits::Zero;
use serde::Serialize;
use std::collections::HashMap;

/// Generic evaluation point `v = e^i` on the unit circle.
///
/// `e^i` is not a root of unity, so no Laurent coefficient of the matrices
/// vanishes by accident when specialized here.
pub fn sample_point() -> Complex<f64> {
    Complex::new(1.0_f64.cos(), 1.0_f64.sin())
}

/// The span of a closure graph as a left module over the generators.
///
/// Column `j` of the matrix of `s` holds the coefficients of `c_s · c_{b_j}`
/// in the basis `b_0, b_1, ...` (the graph vertices in ascending order).
#[derive(Debug, Clone)]
pub struct HeckeModule {
    basis: Vec<Word>,
    index: HashMap<Word, usize>,
    actions: Vec<DMatrix<Laurent>>,
}

/// Evaluated matrices of a module, as written by the command line front end.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixSummary {
    pub generator: u8,
    pub quadratic_defect: f64,
}

impl HeckeModule {
    /// Builds the matrices of `c_1, ..., c_n` on the vertices of `graph`.
    ///
    /// Fails with [`HeckeError::BasisNotClosed`] when a product leaves the
    /// vertex set, which happens when `graph` was built with fewer generators.
    pub fn from_graph(multiplier: &Multiplier, graph: &ClosureGraph, n: u8) -> Result<Self> {
        if n > defaults::MAX_RANK {
            return Err(HeckeError::GeneratorOutOfRange {
                generator: Generator(n),
                rank: defaults::MAX_RANK,
            });
        }

        let basis: Vec<Word> = graph.vertices().cloned().collect();
        let index: HashMap<Word, usize> = basis
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        let dim = basis.len();

        let mut actions = Vec::with_capacity(n as usize);
        for id in 1..=n {
            let s = Generator(id);
            let mut matrix = DMatrix::from_element(dim, dim, Laurent::zero());
            for (j, b) in basis.iter().enumerate() {
                let product = multiplier.multiply(s, b)?;
                for (y, c) in product.iter() {
                    let Some(&i) = index.get(y) else {
                        return Err(HeckeError::BasisNotClosed {
                            generator: s,
                            word: b.clone(),
                            outside: y.clone(),
                        });
                    };
                    matrix[(i, j)] = c.clone();
                }
            }
            actions.push(matrix);
        }

        debug!("module of dimension {} with {} generators", dim, n);
        Ok(HeckeModule {
            basis,
            index,
            actions,
        })
    }

    pub fn basis(&self) -> &[Word] {
        &self.basis
    }

    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    /// Number of generators acting.
    pub fn rank(&self) -> u8 {
        self.actions.len() as u8
    }

    /// Position of `w` in the basis.
    pub fn position(&self, w: &Word) -> Option<usize> {
        self.index.get(w).copied()
    }

    /// The matrix of `c_s` with Laurent polynomial entries.
    pub fn matrix(&self, s: Generator) -> Result<&DMatrix<Laurent>> {
        let i = (s.id() as usize)
            .checked_sub(1)
            .filter(|&i| i < self.actions.len())
            .ok_or(HeckeError::GeneratorOutOfRange {
                generator: s,
                rank: self.rank(),
            })?;
        Ok(&self.actions[i])
    }

    /// The matrix of `c_s` with `v` specialized to a complex number.
    pub fn evaluate(&self, s: Generator, v: Complex<f64>) -> Result<DMatrix<Complex<f64>>> {
        Ok(self.matrix(s)?.map(|c| c.evaluate(v)))
    }

    /// Largest entry modulus of `M² - (v + v⁻¹) M`; zero up to rounding.
    pub fn quadratic_defect(&self, s: Generator, v: Complex<f64>) -> Result<f64> {
        let m = self.evaluate(s, v)?;
        let quadratic = Laurent::v_plus_v_inv().evaluate(v);
        let defect = &m * &m - m * quadratic;
        Ok(defect.iter().map(|z| z.norm()).fold(0.0, f64::max))
    }

    /// Quadratic defect of every generator at `v`.
    pub fn summarize(&self, v: Complex<f64>) -> Result<Vec<MatrixSummary>> {
        (1..=self.rank())
            .map(|id| {
                let s = Generator(id);
                Ok(MatrixSummary {
                    generator: id,
                    quadratic_defect: self.quadratic_defect(s, v)?,
                })
            })
            .collect()
    }
}
