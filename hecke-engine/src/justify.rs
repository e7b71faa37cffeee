use crate::types::{Generator, Word};
use crate::word_ops::{after_pair, before_pair, first_of_pair, neighbors_before, remove_first};

/// Maximal number of letters of an element of the {1, 2} parabolic, which is
/// dihedral of order 8.
const PARABOLIC_LENGTH: usize = 4;

/// Splits `word` as `prefix · remainder` where `prefix` lies in the {1, 2}
/// parabolic subgroup and neither 1 nor 2 is a left descent of `remainder`.
///
/// Letters are peeled alternately starting with the first 1 or 2 of the word.
/// Peeling stops when the next letter is absent, has a neighbor in front of
/// it, or the prefix reached length 4.
///
/// # Example
/// ```
/// use hecke_engine::{extract_parabolic, Word};
///
/// let (prefix, rest) = extract_parabolic(&Word::from_ids(&[1, 2, 3, 1, 4]));
/// assert_eq!(prefix, Word::from_ids(&[1, 2, 1]));
/// assert_eq!(rest, Word::from_ids(&[3, 4]));
/// ```
pub fn extract_parabolic(word: &Word) -> (Word, Word) {
    let mut parabolic = Word::new();
    let mut minimal = word.clone();

    let mut next: Generator = match first_of_pair(word).and_then(|i| word.get(i)) {
        Some(s) => s,
        None => return (parabolic, minimal),
    };

    for _ in 0..PARABOLIC_LENGTH {
        if !minimal.contains(next) || !neighbors_before(next, &minimal).is_empty() {
            break;
        }
        parabolic = parabolic.append(next);
        minimal = remove_first(next, &minimal);
        next = next.parabolic_partner();
    }

    (parabolic, minimal)
}

/// Segments of the left-justified form of `word`.
///
/// Segments alternate between {1, 2}-parabolic pieces and runs free of 1 and 2;
/// empty pieces are skipped. Their product is the element of `word`, possibly
/// written with commuting letters swapped.
///
/// # Example
/// ```
/// use hecke_engine::{left_justify, Word};
///
/// let segments = left_justify(&Word::from_ids(&[1, 2, 3, 1, 4, 2, 1, 5]));
/// assert_eq!(
///     segments,
///     vec![
///         Word::from_ids(&[1, 2, 1]),
///         Word::from_ids(&[3, 4]),
///         Word::from_ids(&[2, 1]),
///         Word::from_ids(&[5]),
///     ]
/// );
/// ```
pub fn left_justify(word: &Word) -> Vec<Word> {
    let mut segments = Vec::new();
    let mut remain = word.clone();

    while !remain.is_empty() {
        let (parabolic, rest) = extract_parabolic(&remain);
        let run = before_pair(&rest);

        if !parabolic.is_empty() {
            segments.push(parabolic);
        }
        if !run.is_empty() {
            segments.push(run);
        }
        remain = after_pair(&rest);
    }

    segments
}

/// Segments of the right-justified form of `word`: the mirror image of
/// [`left_justify`] applied to the reversed word.
pub fn right_justify(word: &Word) -> Vec<Word> {
    left_justify(&word.reversed())
        .iter()
        .rev()
        .map(Word::reversed)
        .collect()
}

/// Concatenates segments back into one word.
pub fn flatten(segments: &[Word]) -> Word {
    segments
        .iter()
        .flat_map(|segment| segment.iter().copied())
        .collect()
}

/// The canonical (flattened left-justified) representative of `word`.
pub fn canonical(word: &Word) -> Word {
    flatten(&left_justify(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(ids: &[u8]) -> Word {
        Word::from_ids(ids)
    }

    #[test]
    fn test_extract_parabolic() {
        assert_eq!(extract_parabolic(&w(&[1, 2, 3])), (w(&[1, 2]), w(&[3])));
        assert_eq!(extract_parabolic(&w(&[1, 2, 3, 1])), (w(&[1, 2, 1]), w(&[3])));
        assert_eq!(extract_parabolic(&w(&[2, 1, 4, 2, 3])), (w(&[2, 1, 2]), w(&[4, 3])));
    }

    #[test]
    fn test_extract_parabolic_blocked_by_three() {
        // the first 2 sits behind a 3, so nothing can be peeled
        assert_eq!(extract_parabolic(&w(&[3, 2, 1])), (Word::new(), w(&[3, 2, 1])));
        assert_eq!(extract_parabolic(&w(&[3, 4])), (Word::new(), w(&[3, 4])));
    }

    #[test]
    fn test_extract_parabolic_caps_at_four() {
        let (prefix, rest) = extract_parabolic(&w(&[1, 2, 1, 2]));
        assert_eq!(prefix, w(&[1, 2, 1, 2]));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_left_justify_examples() {
        assert_eq!(
            left_justify(&w(&[1, 2, 3, 1, 4, 2, 1, 5])),
            vec![w(&[1, 2, 1]), w(&[3, 4]), w(&[2, 1]), w(&[5])]
        );
        assert_eq!(
            left_justify(&w(&[3, 2, 1, 3, 2, 5, 1])),
            vec![w(&[3]), w(&[2, 1]), w(&[3]), w(&[2, 1]), w(&[5])]
        );
    }

    #[test]
    fn test_left_justify_empty() {
        assert!(left_justify(&Word::new()).is_empty());
    }

    #[test]
    fn test_right_justify_example() {
        assert_eq!(
            right_justify(&w(&[1, 2, 3, 1, 4, 2, 1, 5])),
            vec![w(&[1, 2]), w(&[3, 4, 5]), w(&[1, 2, 1])]
        );
    }

    #[test]
    fn test_canonical_moves_commuting_letters() {
        assert_eq!(canonical(&w(&[3, 1])), w(&[1, 3]));
        assert_eq!(canonical(&w(&[3, 1, 2, 1])), w(&[1, 3, 2, 1]));
        assert_eq!(canonical(&w(&[4, 1, 2, 3, 6, 1])), w(&[1, 2, 1, 4, 3, 6]));
    }

    #[test]
    fn test_canonical_is_idempotent_on_examples() {
        for ids in [
            &[1, 2, 3, 1, 4, 2, 1, 5][..],
            &[3, 2, 1, 3, 2, 5, 1],
            &[3, 1, 2, 3, 1, 4, 5, 2],
            &[4, 1, 2, 1, 7, 3, 6],
        ] {
            let once = left_justify(&w(ids));
            assert_eq!(left_justify(&flatten(&once)), once, "word {:?}", ids);
        }
    }
}
