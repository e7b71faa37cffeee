use crate::types::{Generator, Word};

/// Removes the first occurrence of `s` from `word`.
///
/// Returns the word unchanged if `s` does not occur; callers only ask for
/// generators they know are present.
///
/// # Example
/// ```
/// use hecke_engine::{word_ops::remove_first, Generator, Word};
///
/// let w = Word::from_ids(&[1, 2, 3, 4, 3, 2]);
/// assert_eq!(remove_first(Generator(3), &w), Word::from_ids(&[1, 2, 4, 3, 2]));
/// ```
pub fn remove_first(s: Generator, word: &Word) -> Word {
    match word.position(s) {
        Some(i) => word.prefix(i).concat(&word.suffix(i + 1)),
        None => word.clone(),
    }
}

/// Indices of neighbors of `s` strictly before its first occurrence in `word`.
/// Scanning stops once two are found.
///
/// The length classifies left multiplication by `s`:
/// - 0: `s` is a left descent of `word`
/// - 2: `s·word` is again fully commutative
/// - 1: the remaining case, handled by the star operations
///
/// Empty when `s` does not occur.
///
/// # Example
/// ```
/// use hecke_engine::{word_ops::neighbors_before, Generator, Word};
///
/// let w = Word::from_ids(&[2, 1, 4, 2, 3]);
/// assert_eq!(neighbors_before(Generator(3), &w), vec![0, 2]);
/// ```
pub fn neighbors_before(s: Generator, word: &Word) -> Vec<usize> {
    let end = match word.position(s) {
        Some(i) => i,
        None => return Vec::new(),
    };

    word.as_slice()[..end]
        .iter()
        .enumerate()
        .filter(|(_, g)| g.is_neighbor(s))
        .map(|(i, _)| i)
        .take(2)
        .collect()
}

/// Index of the first generator of the {1, 2} parabolic in `word`.
pub fn first_of_pair(word: &Word) -> Option<usize> {
    word.iter().position(|g| g.is_parabolic())
}

/// The part of `word` before its first 1 or 2 (all of it if there is none).
pub fn before_pair(word: &Word) -> Word {
    match first_of_pair(word) {
        Some(i) => word.prefix(i),
        None => word.clone(),
    }
}

/// The part of `word` starting at its first 1 or 2 (empty if there is none).
pub fn after_pair(word: &Word) -> Word {
    match first_of_pair(word) {
        Some(i) => word.suffix(i),
        None => Word::new(),
    }
}

/// Index of the leftmost neighbor of `s` in `word`.
pub fn first_neighbor(s: Generator, word: &Word) -> Option<usize> {
    word.iter().position(|g| g.is_neighbor(s))
}

/// True when `a` and `b` are related by swaps of adjacent commuting letters.
///
/// Two words are commutation equivalent exactly when, for every pair of
/// non-commuting generators (including a generator with itself), the
/// subsequences of letters from that pair agree.
pub fn commutation_equivalent(a: &Word, b: &Word) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut letters: Vec<Generator> = a.iter().chain(b.iter()).copied().collect();
    letters.sort();
    letters.dedup();

    for (i, &s) in letters.iter().enumerate() {
        for &t in &letters[i..] {
            if s.commutes_with(t) {
                continue;
            }
            let restrict = |w: &Word| -> Vec<Generator> {
                w.iter().copied().filter(|&g| g == s || g == t).collect()
            };
            if restrict(a) != restrict(b) {
                return false;
            }
        }
    }
    true
}
