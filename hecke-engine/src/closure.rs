use crate::combination::LinearCombination;
use crate::config::EngineConfig;
use crate::error::{HeckeError, Result};
use crate::justify::canonical;
use crate::laurent::Laurent;
use crate::step::step;
use crate::types::{Generator, Word};
use log::{debug, trace};
use num_traits::{One, Zero};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Pending work: `c_{prefix} · c_word`, with `prefix` a product of generators
/// that still has to be multiplied in from its right end.
type Pending = (Word, Word);

/// Resolves products of canonical basis elements with the one-step rule.
///
/// The worklist is an ordered map, always popping its smallest key, so traces
/// are reproducible; the result does not depend on the order.
#[derive(Debug, Clone, Default)]
pub struct Multiplier {
    config: EngineConfig,
}

impl Multiplier {
    pub fn new(config: EngineConfig) -> Self {
        Multiplier { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes `c_s · c_w` in the canonical basis.
    pub fn multiply(&self, s: Generator, w: &Word) -> Result<LinearCombination> {
        self.multiply_word(&Word::from_generators(vec![s]), w)
    }

    /// Computes `c_{s1} c_{s2} ... c_{sk} · c_w` for `prefix = s1 s2 ... sk`.
    ///
    /// The prefix is consumed from its right end. An empty prefix returns the
    /// canonical form of `w`.
    pub fn multiply_word(&self, prefix: &Word, w: &Word) -> Result<LinearCombination> {
        debug!("multiplying c[{}] * c[{}]", prefix, w);

        let mut todo: BTreeMap<Pending, Laurent> = BTreeMap::new();
        todo.insert((prefix.clone(), w.clone()), Laurent::one());
        let mut done = LinearCombination::new();
        let mut steps = 0usize;

        while let Some(((pending, word), c)) = todo.pop_first() {
            steps += 1;
            if steps > self.config.max_steps {
                return Err(HeckeError::StepBudgetExceeded {
                    prefix: prefix.clone(),
                    word: w.clone(),
                    steps: self.config.max_steps,
                });
            }

            let Some(&t) = pending.as_slice().last() else {
                done.add_term(word, c);
                continue;
            };
            let rest = pending.prefix(pending.len() - 1);

            let terms = step(t, &word);
            trace!("step {} on {}: {} terms", t, word, terms.len());
            for term in terms {
                let key = (rest.concat(&term.prefix), term.word);
                push(&mut todo, key, &c * &term.coefficient);
            }
        }

        let result = clean_up(done);
        debug!("c[{}] * c[{}] = {} ({} steps)", prefix, w, result, steps);
        Ok(result)
    }

    /// Computes `c_s · x` for a linear combination `x`.
    pub fn multiply_combination(
        &self,
        s: Generator,
        x: &LinearCombination,
    ) -> Result<LinearCombination> {
        let mut out = LinearCombination::new();
        for (w, c) in x.iter() {
            let product = self.multiply(s, w)?;
            out.add_scaled(&product, c);
        }
        Ok(out)
    }
}

fn push(todo: &mut BTreeMap<Pending, Laurent>, key: Pending, c: Laurent) {
    if c.is_zero() {
        return;
    }
    match todo.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(c);
        }
        Entry::Occupied(mut slot) => {
            *slot.get_mut() += c;
            if slot.get().is_zero() {
                slot.remove();
            }
        }
    }
}

/// Re-keys every word by its canonical form, merging coefficients of words
/// that name the same element. Zero coefficients never survive.
pub fn clean_up(done: LinearCombination) -> LinearCombination {
    done.into_iter()
        .map(|(word, c)| (canonical(&word), c))
        .collect()
}

/// Computes `c_s · c_w` with the default configuration.
///
/// # Example
/// ```
/// use hecke_engine::{multiply, Generator, Laurent, Word};
///
/// // c_2 c_12 = c_212 + c_2
/// let product = multiply(Generator(2), &Word::from_ids(&[1, 2])).unwrap();
/// assert_eq!(product.len(), 2);
/// assert_eq!(product.coefficient(&Word::from_ids(&[2, 1, 2])), Laurent::constant(1));
/// assert_eq!(product.coefficient(&Word::from_ids(&[2])), Laurent::constant(1));
/// ```
pub fn multiply(s: Generator, w: &Word) -> Result<LinearCombination> {
    Multiplier::default().multiply(s, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(ids: &[u8]) -> Word {
        Word::from_ids(ids)
    }

    fn one_term(ids: &[u8]) -> LinearCombination {
        LinearCombination::singleton(w(ids), Laurent::constant(1))
    }

    #[test]
    fn test_multiply_absent_generator() {
        assert_eq!(multiply(Generator(1), &w(&[2])).unwrap(), one_term(&[1, 2]));
    }

    #[test]
    fn test_multiply_descent() {
        let product = multiply(Generator(1), &w(&[1, 3])).unwrap();
        assert_eq!(
            product,
            LinearCombination::singleton(w(&[1, 3]), Laurent::v_plus_v_inv())
        );
    }

    #[test]
    fn test_multiply_resolves_pending_prefix() {
        // c_1 c_321 = c_3 (c_121 + c_1) = c_1321 + c_13 after justification
        let product = multiply(Generator(1), &w(&[3, 2, 1])).unwrap();
        let expected: LinearCombination = vec![
            (w(&[1, 3, 2, 1]), Laurent::constant(1)),
            (w(&[1, 3]), Laurent::constant(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(product, expected);
    }

    #[test]
    fn test_multiply_cancels_through_composite_prefix() {
        // the -c_4361 from the A expansion cancels against a later star term
        let product = multiply(Generator(6), &w(&[4, 1, 2, 1, 7, 3, 6])).unwrap();
        assert_eq!(product, one_term(&[1, 2, 1, 4, 3, 6]));
    }

    #[test]
    fn test_multiply_zero_product() {
        assert!(multiply(Generator(3), &w(&[1, 2, 1, 3])).unwrap().is_empty());
    }

    #[test]
    fn test_multiply_word_is_iterated_multiply() {
        let m = Multiplier::default();
        let direct = m.multiply_word(&w(&[1, 2]), &w(&[3])).unwrap();
        let inner = m.multiply(Generator(2), &w(&[3])).unwrap();
        let iterated = m.multiply_combination(Generator(1), &inner).unwrap();
        assert_eq!(direct, iterated);
        assert_eq!(direct, one_term(&[1, 2, 3]));
    }

    #[test]
    fn test_multiply_word_with_empty_prefix_canonicalizes() {
        let m = Multiplier::default();
        assert_eq!(m.multiply_word(&Word::new(), &w(&[3, 1])).unwrap(), one_term(&[1, 3]));
    }

    #[test]
    fn test_step_budget() {
        let m = Multiplier::new(EngineConfig::default().with_max_steps(1));
        let err = m.multiply(Generator(1), &w(&[2])).unwrap_err();
        assert!(matches!(err, HeckeError::StepBudgetExceeded { steps: 1, .. }));
    }

    #[test]
    fn test_clean_up_merges_commutation_classes() {
        let done: LinearCombination = vec![
            (w(&[3, 1]), Laurent::constant(2)),
            (w(&[1, 3]), Laurent::constant(-2)),
            (w(&[2]), Laurent::v()),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            clean_up(done),
            LinearCombination::singleton(w(&[2]), Laurent::v())
        );
    }
}
