use crate::factors::{canonical_factors, expand, literal};
use crate::justify::extract_parabolic;
use crate::laurent::Laurent;
use crate::types::{Factor, Generator, Word};
use crate::word_ops::{first_neighbor, neighbors_before};
use log::warn;
use num_traits::One;

/// One term of a single multiplication step: `coefficient · c_{prefix} · c_word`,
/// where `prefix` is a product of generators still to be multiplied on the left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTerm {
    pub prefix: Word,
    pub word: Word,
    pub coefficient: Laurent,
}

/// How `c_s · c_w` is resolved in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCase {
    /// `s` does not occur in `w`.
    Absent,
    /// `s` is a left descent of `w`.
    Descent,
    /// `s` has two neighbors in front of it, so `s·w` is FC.
    Extends,
    /// `s` lies away from the {1, 2} parabolic.
    Distant,
    /// One of the four star operations near generators 1, 2, 3.
    Star,
}

/// Classifies left multiplication of `w` by `s`.
pub fn classify(s: Generator, w: &Word) -> StepCase {
    if !w.contains(s) {
        return StepCase::Absent;
    }
    match neighbors_before(s, w).len() {
        0 => StepCase::Descent,
        2 => StepCase::Extends,
        _ if is_distant(s, w) => StepCase::Distant,
        _ => StepCase::Star,
    }
}

/// `s > 3`, or `s = 3` with 4 as its leftmost neighbor.
fn is_distant(s: Generator, w: &Word) -> bool {
    s.id() > 3
        || (s.id() == 3
            && first_neighbor(s, w).and_then(|i| w.get(i)) == Some(Generator(4)))
}

/// Computes one step of the left multiplication `c_s · c_w`.
///
/// The result is a list of terms `coefficient · c_{prefix} · c_word`. Prefixes
/// are products of plain generators coming from the expansion of the factors
/// left of the rewritten position; they still have to be multiplied in,
/// which is the job of [`crate::closure::multiply`]. An empty list is the zero
/// element.
///
/// # Example
/// ```
/// use hecke_engine::{step, Generator, Laurent, Word};
///
/// // s is a left descent: c_s c_w = (v + v^-1) c_w
/// let terms = step(Generator(1), &Word::from_ids(&[1, 3]));
/// assert_eq!(terms.len(), 1);
/// assert_eq!(terms[0].word, Word::from_ids(&[1, 3]));
/// assert_eq!(terms[0].coefficient, Laurent::v_plus_v_inv());
/// ```
pub fn step(s: Generator, w: &Word) -> Vec<StepTerm> {
    let (left, words) = match classify(s, w) {
        StepCase::Absent | StepCase::Extends => {
            (Vec::new(), vec![(w.prepend(s), Laurent::one())])
        }
        StepCase::Descent => (Vec::new(), vec![(w.clone(), Laurent::v_plus_v_inv())]),
        StepCase::Distant => distant(s, w),
        StepCase::Star => star(s, w),
    };

    let prefixes = expand(&left);
    let mut terms = Vec::with_capacity(prefixes.len() * words.len());
    for (prefix, a) in prefixes.iter() {
        for (word, b) in &words {
            terms.push(StepTerm {
                prefix: prefix.clone(),
                word: word.clone(),
                coefficient: a * b,
            });
        }
    }
    terms
}

type Resolution = (Vec<Factor>, Vec<(Word, Laurent)>);

/// Far from the {1, 2} parabolic, `c_s c_w` removes the neighbor `t` of `s`
/// that sits in front of it (`c_s c_t c_s = c_s` in the quotient). The factors
/// left of `t` stay as a pending prefix.
fn distant(s: Generator, w: &Word) -> Resolution {
    let factors = canonical_factors(w);
    let neighbor = factors
        .iter()
        .position(|f| f.as_generator().map_or(false, |g| g.is_neighbor(s)));

    let Some(k) = neighbor else {
        warn!("no plain neighbor of {} among the factors of {}", s, w);
        return (Vec::new(), Vec::new());
    };

    let left = factors[..k].to_vec();
    let right = literal(&factors[k + 1..]);
    (left, vec![(right, Laurent::one())])
}

/// The star operations for `s` in {1, 2, 3} with exactly one neighbor in front.
///
/// `w` is split at the first occurrence of the partner generator; the part in
/// front becomes the pending prefix, the part from the partner on is rewritten.
fn star(s: Generator, w: &Word) -> Resolution {
    let partner = match first_neighbor(s, w).and_then(|i| w.get(i)) {
        Some(t) => t,
        None => {
            warn!("star operation for {} on {} without a neighbor", s, w);
            return (Vec::new(), Vec::new());
        }
    };

    // s = 3 against 2 is zero when the {1, 2} coset of w is 121
    if s == Generator(3)
        && partner == Generator(2)
        && extract_parabolic(w).0 == Word::from_ids(&[1, 2, 1])
    {
        return (Vec::new(), Vec::new());
    }

    let Some(split) = w.position(partner) else {
        return (Vec::new(), Vec::new());
    };
    let left: Vec<Factor> = w.prefix(split).iter().map(|&g| g.into()).collect();
    let z = w.suffix(split);

    let words = match (s.id(), partner.id()) {
        // order-4 pair: branch on the size of the {1, 2} coset of z
        (1, 2) | (2, 1) => dihedral(s, partner, &z),
        // order-3 pair: drop the partner
        _ => vec![(z.suffix(1), Laurent::one())],
    };
    (left, words)
}

fn dihedral(s: Generator, partner: Generator, z: &Word) -> Vec<(Word, Laurent)> {
    let (coset, _) = extract_parabolic(z);
    let smallest = Word::from_generators(vec![partner]);
    let longest = Word::from_generators(vec![partner, s, partner, s]);

    if coset == smallest {
        vec![(z.prepend(s), Laurent::one())]
    } else if coset == longest {
        vec![(z.suffix(1), Laurent::one())]
    } else {
        vec![(z.prepend(s), Laurent::one()), (z.suffix(1), Laurent::one())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn w(ids: &[u8]) -> Word {
        Word::from_ids(ids)
    }

    fn term(prefix: &[u8], word: &[u8], c: i64) -> StepTerm {
        StepTerm {
            prefix: w(prefix),
            word: w(word),
            coefficient: Laurent::constant(c),
        }
    }

    #[test]
    fn test_absent_generator_extends() {
        assert_eq!(step(Generator(1), &w(&[2, 3])), vec![term(&[], &[1, 2, 3], 1)]);
        assert_eq!(classify(Generator(1), &w(&[2, 3])), StepCase::Absent);
    }

    #[test]
    fn test_descent_gives_v_plus_v_inv() {
        let terms = step(Generator(1), &w(&[5, 4, 1, 2]));
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].prefix, Word::new());
        assert_eq!(terms[0].word, w(&[5, 4, 1, 2]));
        assert_eq!(terms[0].coefficient, Laurent::v_plus_v_inv());
    }

    #[test]
    fn test_no_neighbor_in_front_is_a_descent() {
        // 3 leads the word, so no star operation applies
        let terms = step(Generator(3), &w(&[3, 2, 1]));
        assert_eq!(classify(Generator(3), &w(&[3, 2, 1])), StepCase::Descent);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].coefficient, Laurent::v_plus_v_inv());
    }

    #[test]
    fn test_two_neighbors_extends() {
        assert_eq!(
            step(Generator(3), &w(&[5, 2, 4, 1, 3, 2])),
            vec![term(&[], &[3, 5, 2, 4, 1, 3, 2], 1)]
        );
    }

    #[test]
    fn test_distant_removes_neighbor_and_expands_prefix() {
        // factors of 4121736 are 4 A 7 3 6 1; the 7 in front of 6 is removed
        let terms = step(Generator(6), &w(&[4, 1, 2, 1, 7, 3, 6]));
        assert_eq!(classify(Generator(6), &w(&[4, 1, 2, 1, 7, 3, 6])), StepCase::Distant);
        assert_eq!(
            terms,
            vec![term(&[4], &[3, 6, 1], -1), term(&[4, 1, 2], &[3, 6, 1], 1)]
        );
    }

    #[test]
    fn test_distant_three_against_four() {
        assert_eq!(step(Generator(4), &w(&[3, 4])), vec![term(&[], &[4], 1)]);
        assert_eq!(step(Generator(3), &w(&[4, 3])), vec![term(&[], &[3], 1)]);
    }

    #[test]
    fn test_star_one_against_two() {
        // coset 21: two terms, prefix 3 kept in front
        assert_eq!(
            step(Generator(1), &w(&[3, 2, 1])),
            vec![term(&[3], &[1, 2, 1], 1), term(&[3], &[1], 1)]
        );
        // 3 commutes with 1, so the coset of 231 is still 21
        assert_eq!(
            step(Generator(1), &w(&[2, 3, 1])),
            vec![term(&[], &[1, 2, 3, 1], 1), term(&[], &[3, 1], 1)]
        );
    }

    #[test]
    fn test_star_two_against_one() {
        assert_eq!(
            step(Generator(2), &w(&[1, 2])),
            vec![term(&[], &[2, 1, 2], 1), term(&[], &[2], 1)]
        );
        assert_eq!(step(Generator(2), &w(&[1, 2, 1, 2])), vec![term(&[], &[2, 1, 2], 1)]);
    }

    #[test]
    fn test_star_two_and_three() {
        assert_eq!(step(Generator(2), &w(&[3, 2])), vec![term(&[], &[2], 1)]);
        assert_eq!(step(Generator(3), &w(&[2, 3])), vec![term(&[], &[3], 1)]);
        assert_eq!(step(Generator(3), &w(&[5, 2, 3])), vec![term(&[5], &[3], 1)]);
    }

    #[test]
    fn test_three_against_coset_121_is_zero() {
        assert_eq!(classify(Generator(3), &w(&[1, 2, 1, 3])), StepCase::Star);
        assert!(step(Generator(3), &w(&[1, 2, 1, 3])).is_empty());
    }

    #[test]
    fn test_descent_boundary_has_no_other_terms() {
        for ids in [&[1, 3][..], &[2, 1, 2], &[4, 3, 5], &[1, 2, 1, 4, 3, 6]] {
            let word = w(ids);
            let s = word.as_slice()[0];
            assert!(neighbors_before(s, &word).is_empty());
            let terms = step(s, &word);
            assert_eq!(terms.len(), 1);
            assert_eq!(terms[0].word, word);
            assert!(!terms[0].coefficient.is_zero());
            assert_eq!(terms[0].coefficient, Laurent::v_plus_v_inv());
        }
    }
}
