use crate::combination::LinearCombination;
use crate::justify::right_justify;
use crate::laurent::Laurent;
use crate::types::{CompositeFactor, Factor, Generator, Word};

/// Factor sequence of the canonical basis element of `word`.
///
/// Each {1, 2} segment of the right-justified form becomes either plain
/// generators or one composite factor; the choice for `12` and `212` looks two
/// segments ahead, where a segment starting with 1 means the block is linked
/// to a later 1 through the 3-4 part of the diagram. Other segments pass
/// through as plain generators.
///
/// # Example
/// ```
/// use hecke_engine::{canonical_factors, CompositeFactor, Factor, Generator, Word};
///
/// let factors = canonical_factors(&Word::from_ids(&[1, 2, 3, 1, 4, 2, 1, 5]));
/// let g = |id| Factor::Generator(Generator(id));
/// assert_eq!(
///     factors,
///     vec![
///         Factor::Composite(CompositeFactor::A),
///         g(3),
///         g(4),
///         g(5),
///         Factor::Composite(CompositeFactor::B),
///     ]
/// );
/// ```
pub fn canonical_factors(word: &Word) -> Vec<Factor> {
    let segments = right_justify(word);
    let mut factors = Vec::with_capacity(word.len());

    let starts_with_one = |i: usize| {
        segments
            .get(i)
            .and_then(|segment| segment.get(0))
            .map_or(false, |g| g == Generator(1))
    };

    for (i, segment) in segments.iter().enumerate() {
        let ids: Vec<u8> = segment.iter().map(Generator::id).collect();
        let composite = match ids.as_slice() {
            [1, 2] if i + 2 < segments.len() && starts_with_one(i + 2) => Some(CompositeFactor::A),
            [1, 2, 1] => Some(CompositeFactor::B),
            [2, 1, 2] if i + 3 < segments.len() && starts_with_one(i + 2) => {
                Some(CompositeFactor::E)
            }
            [2, 1, 2] => Some(CompositeFactor::C),
            [1, 2, 1, 2] => Some(CompositeFactor::D),
            [2, 1, 2, 1] => Some(CompositeFactor::F),
            _ => None,
        };

        match composite {
            Some(c) => factors.push(Factor::Composite(c)),
            None => factors.extend(segment.iter().map(|&g| Factor::Generator(g))),
        }
    }

    factors
}

/// The word spelled by a factor sequence, with every composite factor replaced
/// by its underlying word.
pub fn literal(factors: &[Factor]) -> Word {
    let mut letters = Vec::new();
    for factor in factors {
        match factor {
            Factor::Generator(g) => letters.push(*g),
            Factor::Composite(c) => letters.extend(c.letters().iter().map(|&id| Generator(id))),
        }
    }
    Word::from_generators(letters)
}

/// Expands a factor product into a signed sum of products of generators.
///
/// The result maps each generator word `s1 s2 ... sk` (read as the product
/// `c_{s1} c_{s2} ... c_{sk}`) to its coefficient. Plain generators extend every
/// word; composite factors replace every word by the terms of their
/// closed-form expansion. Each step works on a snapshot of the previous map.
///
/// # Example
/// ```
/// use hecke_engine::{expand, CompositeFactor, Factor, Laurent, Word};
///
/// let poly = expand(&[Factor::Composite(CompositeFactor::D)]);
/// assert_eq!(poly.coefficient(&Word::from_ids(&[1, 2, 1, 2])), Laurent::constant(1));
/// assert_eq!(poly.coefficient(&Word::from_ids(&[1, 2])), Laurent::constant(-2));
/// ```
pub fn expand(factors: &[Factor]) -> LinearCombination {
    let mut current = LinearCombination::singleton(Word::new(), Laurent::constant(1));

    for factor in factors {
        let mut next = LinearCombination::new();
        for (word, c) in current.iter() {
            match factor {
                Factor::Generator(g) => next.add_term(word.append(*g), c.clone()),
                Factor::Composite(composite) => {
                    for &(suffix, k) in composite.expansion() {
                        let extended = suffix
                            .iter()
                            .fold(word.clone(), |acc, &id| acc.append(Generator(id)));
                        next.add_term(extended, c * k);
                    }
                }
            }
        }
        current = next;
    }

    current
}
