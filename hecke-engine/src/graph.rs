//! Breadth-first closure of an element under left multiplication.

use crate::closure::Multiplier;
use crate::combination::LinearCombination;
use crate::config::defaults;
use crate::error::{HeckeError, Result};
use crate::justify::canonical;
use crate::types::{Generator, Word};
use log::{debug, info};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Directed graph `w -> y` for every `y != w` occurring in some `c_s · c_w`.
///
/// Every visited word is a vertex, including words without successors.
/// Successors are kept in discovery order: by generator, then by word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureGraph {
    edges: BTreeMap<Word, Vec<Word>>,
}

impl ClosureGraph {
    /// Visited words in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &Word> + '_ {
        self.edges.keys()
    }

    pub fn successors(&self, w: &Word) -> Option<&[Word]> {
        self.edges.get(w).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// The adjacency map with words replaced by their integer encodings.
    pub fn encoded(&self) -> BTreeMap<u64, Vec<u64>> {
        self.edges
            .iter()
            .map(|(w, ys)| (w.encode(), ys.iter().map(Word::encode).collect()))
            .collect()
    }
}

impl Multiplier {
    /// Closure of `seed` under left multiplication by `c_1, ..., c_n`.
    pub fn closure_graph(&self, seed: &Word, n: u8) -> Result<ClosureGraph> {
        if n > defaults::MAX_RANK {
            return Err(HeckeError::GeneratorOutOfRange {
                generator: Generator(n),
                rank: defaults::MAX_RANK,
            });
        }

        let start = canonical(seed);
        debug!("closure of {} under {} generators", start, n);

        let mut edges: BTreeMap<Word, Vec<Word>> = BTreeMap::new();
        let mut seen: BTreeSet<Word> = BTreeSet::new();
        let mut queue: VecDeque<Word> = VecDeque::new();
        seen.insert(start.clone());
        queue.push_back(start);

        while let Some(word) = queue.pop_front() {
            let products = self.products(&word, n)?;
            let mut successors: Vec<Word> = Vec::new();

            for product in &products {
                for y in product.words() {
                    if *y == word || successors.contains(y) {
                        continue;
                    }
                    successors.push(y.clone());
                    if seen.insert(y.clone()) {
                        queue.push_back(y.clone());
                    }
                }
            }

            edges.insert(word, successors);
        }

        let graph = ClosureGraph { edges };
        info!(
            "closure graph: {} vertices, {} edges",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// `c_s · c_word` for `s = 1..=n`, in generator order.
    fn products(&self, word: &Word, n: u8) -> Result<Vec<LinearCombination>> {
        if self.config().parallel {
            (1..=n)
                .into_par_iter()
                .map(|s| self.multiply(Generator(s), word))
                .collect()
        } else {
            (1..=n).map(|s| self.multiply(Generator(s), word)).collect()
        }
    }
}

/// Closure graph of `w` under `c_1, ..., c_n` as an adjacency map of word
/// encodings, using the default configuration.
///
/// # Example
/// ```
/// use hecke_engine::{descendants, Word};
///
/// let graph = descendants(&Word::from_ids(&[3]), 1).unwrap();
/// assert_eq!(graph[&3], vec![13]);
/// assert!(graph[&13].is_empty());
/// ```
pub fn descendants(w: &Word, n: u8) -> Result<BTreeMap<u64, Vec<u64>>> {
    Ok(Multiplier::default().closure_graph(w, n)?.encoded())
}
