use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Inline capacity of a [`Word`]. FC elements of the fixed rank-4 system are
/// short, so words almost never spill to the heap.
pub const WORD_INLINE: usize = 16;

/// Simple reflection of the Coxeter system.
/// Uses 1-based ids, matching the diagram labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generator(pub u8);

impl Generator {
    /// Creates a new Generator with 1-based indexing.
    /// Panics if id is 0.
    pub fn new(id: u8) -> Self {
        assert!(id > 0, "Generator must be 1-based (id > 0)");
        Generator(id)
    }

    /// Returns the 1-based generator id.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// True for the two generators of the order-8 dihedral parabolic {1, 2}.
    pub fn is_parabolic(&self) -> bool {
        self.0 == 1 || self.0 == 2
    }

    /// The other generator of the {1, 2} parabolic.
    pub(crate) fn parabolic_partner(&self) -> Generator {
        Generator(3 - self.0)
    }

    /// True when `self` and `other` satisfy a braid relation of order >= 3.
    pub fn is_neighbor(&self, other: Generator) -> bool {
        braid_order(*self, other) >= 3
    }

    /// True when `self` and `other` commute (braid order 2).
    pub fn commutes_with(&self, other: Generator) -> bool {
        braid_order(*self, other) == 2
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Braid order `m(s, t)` of the fixed Coxeter diagram.
///
/// The diagram is a path `1 = 2 - 3 - 4 - ...` where the edge {1, 2} carries
/// order 4 and every other edge order 3. Non-adjacent pairs commute.
pub fn braid_order(s: Generator, t: Generator) -> u8 {
    match (s.0.min(t.0), s.0.max(t.0)) {
        (a, b) if a == b => 1,
        (1, 2) => 4,
        (a, b) if b - a == 1 => 3,
        _ => 2,
    }
}

/// A reduced expression of a fully commutative element.
///
/// Words are immutable values: every edit returns a new word. Reducedness and
/// full commutativity are caller-guaranteed and never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word {
    generators: SmallVec<[Generator; WORD_INLINE]>,
}

impl Word {
    /// Creates the empty word (the identity element).
    pub fn new() -> Self {
        Word {
            generators: SmallVec::new(),
        }
    }

    /// Creates a word from a vector of generators.
    pub fn from_generators(generators: Vec<Generator>) -> Self {
        Word {
            generators: SmallVec::from_vec(generators),
        }
    }

    /// Creates a word from raw generator ids.
    /// Panics if an id is 0.
    pub fn from_ids(ids: &[u8]) -> Self {
        ids.iter().map(|&id| Generator::new(id)).collect()
    }

    /// Returns the generators as a slice.
    pub fn as_slice(&self) -> &[Generator] {
        &self.generators
    }

    /// Returns an iterator over the generators.
    pub fn iter(&self) -> impl Iterator<Item = &Generator> + '_ {
        self.generators.iter()
    }

    /// Returns the number of generators in the word.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Returns true if the word is empty.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Returns the generator at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Generator> {
        self.generators.get(index).copied()
    }

    /// Returns true if `s` occurs in the word.
    pub fn contains(&self, s: Generator) -> bool {
        self.generators.contains(&s)
    }

    /// Index of the first occurrence of `s`.
    pub fn position(&self, s: Generator) -> Option<usize> {
        self.generators.iter().position(|&g| g == s)
    }

    /// The word `s · self`.
    pub fn prepend(&self, s: Generator) -> Word {
        let mut generators = SmallVec::with_capacity(self.len() + 1);
        generators.push(s);
        generators.extend_from_slice(&self.generators);
        Word { generators }
    }

    /// The word `self · s`.
    pub fn append(&self, s: Generator) -> Word {
        let mut generators = self.generators.clone();
        generators.push(s);
        Word { generators }
    }

    /// The word `self · other`.
    pub fn concat(&self, other: &Word) -> Word {
        let mut generators = self.generators.clone();
        generators.extend_from_slice(&other.generators);
        Word { generators }
    }

    /// The letters before `index` (the whole word if `index` is past the end).
    pub fn prefix(&self, index: usize) -> Word {
        self.generators[..index.min(self.len())].iter().copied().collect()
    }

    /// The letters from `index` on (empty if `index` is past the end).
    pub fn suffix(&self, index: usize) -> Word {
        self.generators[index.min(self.len())..].iter().copied().collect()
    }

    /// The letters in reverse order.
    pub fn reversed(&self) -> Word {
        self.generators.iter().rev().copied().collect()
    }

    /// Integer encoding used by the closure graph: decimal digits concatenated.
    ///
    /// The empty word encodes to 0. Ids above 9 make the encoding ambiguous,
    /// and words longer than 19 letters overflow `u64`; the FC elements of the
    /// fixed system stay well inside both limits. Debug builds assert on
    /// overflow, release builds wrap.
    pub fn encode(&self) -> u64 {
        let encoded = self.checked_encode();
        debug_assert!(encoded.is_some(), "word {} does not fit the u64 encoding", self);
        encoded.unwrap_or_else(|| {
            self.generators
                .iter()
                .fold(0u64, |acc, g| acc.wrapping_mul(10).wrapping_add(u64::from(g.0)))
        })
    }

    /// The integer encoding, or `None` when it overflows `u64`.
    pub fn checked_encode(&self) -> Option<u64> {
        self.generators.iter().try_fold(0u64, |acc, g| {
            acc.checked_mul(10)?.checked_add(u64::from(g.0))
        })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "e");
        }
        for g in &self.generators {
            write!(f, "{}", g)?;
        }
        Ok(())
    }
}

impl From<Vec<Generator>> for Word {
    fn from(generators: Vec<Generator>) -> Self {
        Word::from_generators(generators)
    }
}

impl FromIterator<Generator> for Word {
    fn from_iter<I: IntoIterator<Item = Generator>>(iter: I) -> Self {
        Word {
            generators: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Generator;
    type IntoIter = std::slice::Iter<'a, Generator>;

    fn into_iter(self) -> Self::IntoIter {
        self.generators.iter()
    }
}

/// The six composite factors of the {1, 2} parabolic.
///
/// Each one stands for a fixed short word and a fixed signed combination of
/// products of `c_1`, `c_2`:
///
/// | tag | word | expansion |
/// |-----|------|-----------|
/// | A | 12   | c1c2 - 1 |
/// | B | 121  | c1c2c1 - c1 |
/// | C | 212  | c2c1c2 - c2 |
/// | D | 1212 | c1c2c1c2 - 2c1c2 |
/// | E | 212  | c2c1c2 - 2c2 |
/// | F | 2121 | c2c1c2c1 - 2c2c1 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompositeFactor {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl CompositeFactor {
    pub const ALL: [CompositeFactor; 6] = [
        CompositeFactor::A,
        CompositeFactor::B,
        CompositeFactor::C,
        CompositeFactor::D,
        CompositeFactor::E,
        CompositeFactor::F,
    ];

    /// Generator ids of the underlying word.
    pub fn letters(self) -> &'static [u8] {
        match self {
            CompositeFactor::A => &[1, 2],
            CompositeFactor::B => &[1, 2, 1],
            CompositeFactor::C | CompositeFactor::E => &[2, 1, 2],
            CompositeFactor::D => &[1, 2, 1, 2],
            CompositeFactor::F => &[2, 1, 2, 1],
        }
    }

    /// The underlying word.
    pub fn word(self) -> Word {
        self.letters().iter().map(|&id| Generator(id)).collect()
    }

    /// Terms `(suffix, coefficient)` of the closed-form expansion.
    pub fn expansion(self) -> &'static [(&'static [u8], i64)] {
        match self {
            CompositeFactor::A => &[(&[], -1), (&[1, 2], 1)],
            CompositeFactor::B => &[(&[1, 2, 1], 1), (&[1], -1)],
            CompositeFactor::C => &[(&[2, 1, 2], 1), (&[2], -1)],
            CompositeFactor::D => &[(&[1, 2, 1, 2], 1), (&[1, 2], -2)],
            CompositeFactor::E => &[(&[2, 1, 2], 1), (&[2], -2)],
            CompositeFactor::F => &[(&[2, 1, 2, 1], 1), (&[2, 1], -2)],
        }
    }
}

impl fmt::Display for CompositeFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            CompositeFactor::A => "A",
            CompositeFactor::B => "B",
            CompositeFactor::C => "C",
            CompositeFactor::D => "D",
            CompositeFactor::E => "E",
            CompositeFactor::F => "F",
        };
        write!(f, "{}", tag)
    }
}

/// One entry of a canonical factor sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    Generator(Generator),
    Composite(CompositeFactor),
}

impl Factor {
    /// Returns the plain generator, if this factor is one.
    pub fn as_generator(&self) -> Option<Generator> {
        match self {
            Factor::Generator(g) => Some(*g),
            Factor::Composite(_) => None,
        }
    }
}

impl From<Generator> for Factor {
    fn from(g: Generator) -> Self {
        Factor::Generator(g)
    }
}

impl From<CompositeFactor> for Factor {
    fn from(c: CompositeFactor) -> Self {
        Factor::Composite(c)
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Generator(g) => write!(f, "{}", g),
            Factor::Composite(c) => write!(f, "{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braid_order_table() {
        let g = Generator::new;
        assert_eq!(braid_order(g(1), g(1)), 1);
        assert_eq!(braid_order(g(1), g(2)), 4);
        assert_eq!(braid_order(g(2), g(1)), 4);
        assert_eq!(braid_order(g(2), g(3)), 3);
        assert_eq!(braid_order(g(3), g(4)), 3);
        assert_eq!(braid_order(g(1), g(3)), 2);
        assert_eq!(braid_order(g(2), g(4)), 2);
        assert!(g(3).is_neighbor(g(4)));
        assert!(g(1).commutes_with(g(4)));
    }

    #[test]
    #[should_panic]
    fn test_generator_zero_panics() {
        Generator::new(0);
    }

    #[test]
    fn test_word_edits() {
        let w = Word::from_ids(&[1, 2, 3]);
        assert_eq!(w.prepend(Generator(4)), Word::from_ids(&[4, 1, 2, 3]));
        assert_eq!(w.prefix(1), Word::from_ids(&[1]));
        assert_eq!(w.suffix(1), Word::from_ids(&[2, 3]));
        assert_eq!(w.suffix(7), Word::new());
        assert_eq!(w.reversed(), Word::from_ids(&[3, 2, 1]));
        assert_eq!(w.concat(&Word::from_ids(&[4])), Word::from_ids(&[1, 2, 3, 4]));
        assert_eq!(w.position(Generator(3)), Some(2));
        assert_eq!(w.position(Generator(5)), None);
    }

    #[test]
    fn test_word_encode_and_display() {
        let w = Word::from_ids(&[1, 2, 1, 3]);
        assert_eq!(w.encode(), 1213);
        assert_eq!(w.to_string(), "1213");
        assert_eq!(Word::new().encode(), 0);
        assert_eq!(Word::new().to_string(), "e");
    }

    #[test]
    fn test_checked_encode_limit() {
        let nineteen = Word::from_ids(&[9; 19]);
        assert_eq!(nineteen.checked_encode(), Some(9_999_999_999_999_999_999));
        assert_eq!(Word::from_ids(&[1; 20]).checked_encode(), None);
        assert_eq!(Word::from_ids(&[4, 3]).checked_encode(), Some(43));
    }

    #[test]
    fn test_composite_letters_match_expansion_leading_term() {
        for c in CompositeFactor::ALL {
            let (lead, coeff) = c
                .expansion()
                .iter()
                .max_by_key(|(suffix, _)| suffix.len())
                .copied()
                .unwrap();
            assert_eq!(lead, c.letters(), "leading term of {}", c);
            assert_eq!(coeff, 1);
        }
    }
}
