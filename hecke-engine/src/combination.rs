use crate::laurent::Laurent;
use crate::types::Word;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// A linear combination of basis elements `c_w` with Laurent coefficients.
///
/// Entries whose coefficient nets to zero are removed on every mutation, so an
/// absent key and a zero coefficient are the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearCombination {
    terms: BTreeMap<Word, Laurent>,
}

impl LinearCombination {
    /// The zero element.
    pub fn new() -> Self {
        LinearCombination {
            terms: BTreeMap::new(),
        }
    }

    /// The single term `coefficient * c_word`.
    pub fn singleton(word: Word, coefficient: Laurent) -> Self {
        let mut lc = LinearCombination::new();
        lc.add_term(word, coefficient);
        lc
    }

    /// Adds `coefficient * c_word`, merging with an existing entry.
    pub fn add_term(&mut self, word: Word, coefficient: Laurent) {
        if coefficient.is_zero() {
            return;
        }
        match self.terms.entry(word) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(coefficient);
            }
            btree_map::Entry::Occupied(mut slot) => {
                *slot.get_mut() += coefficient;
                if slot.get().is_zero() {
                    slot.remove();
                }
            }
        }
    }

    /// Adds every term of `other` scaled by `factor`.
    pub fn add_scaled(&mut self, other: &LinearCombination, factor: &Laurent) {
        for (word, c) in &other.terms {
            self.add_term(word.clone(), c * factor);
        }
    }

    /// Coefficient of `c_word` (zero when absent).
    pub fn coefficient(&self, word: &Word) -> Laurent {
        self.terms.get(word).cloned().unwrap_or_default()
    }

    pub fn get(&self, word: &Word) -> Option<&Laurent> {
        self.terms.get(word)
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.terms.contains_key(word)
    }

    /// Iterates over terms in word order.
    pub fn iter(&self) -> impl Iterator<Item = (&Word, &Laurent)> + '_ {
        self.terms.iter()
    }

    /// Iterates over the words carrying a non-zero coefficient.
    pub fn words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.terms.keys()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<(Word, Laurent)> for LinearCombination {
    fn from_iter<I: IntoIterator<Item = (Word, Laurent)>>(iter: I) -> Self {
        let mut lc = LinearCombination::new();
        for (word, c) in iter {
            lc.add_term(word, c);
        }
        lc
    }
}

impl IntoIterator for LinearCombination {
    type Item = (Word, Laurent);
    type IntoIter = btree_map::IntoIter<Word, Laurent>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl fmt::Display for LinearCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (word, c)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "({})c[{}]", c, word)?;
        }
        Ok(())
    }
}
