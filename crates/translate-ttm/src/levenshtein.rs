// Levenshtein edit distance over Unicode code points
// Origin: ttmserver/TTMServer.php

/// Longest input (in bytes) for which the byte-level fast path is used.
pub const FAST_PATH_MAX_BYTES: usize = 255;

/// Edit distance between `a` and `b`, counted in Unicode code points.
///
/// Insertions, deletions and substitutions each cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b, a.chars().count(), b.chars().count())
}

/// Edit distance with caller-supplied code point lengths.
///
/// `len_a` and `len_b` must be `a.chars().count()` and `b.chars().count()`;
/// callers that already know them (e.g. from a stored length column) avoid
/// counting twice.
///
/// When both strings are ASCII and short, the distance is computed over
/// bytes, which gives the same result without decoding.
pub fn levenshtein(a: &str, b: &str, len_a: usize, len_b: usize) -> usize {
    debug_assert_eq!(len_a, a.chars().count());
    debug_assert_eq!(len_b, b.chars().count());

    if len_a == 0 {
        return len_b;
    }
    if len_b == 0 {
        return len_a;
    }
    if a == b {
        return 0;
    }

    // One byte per code point means the string is ASCII.
    if a.len() == len_a
        && a.len() <= FAST_PATH_MAX_BYTES
        && b.len() == len_b
        && b.len() <= FAST_PATH_MAX_BYTES
    {
        return distance(a.as_bytes(), b.as_bytes());
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance(&a, &b)
}

/// Edit distance over code points without the byte fast path.
///
/// Always decodes both strings. Exposed so the two paths can be compared.
pub fn char_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance(&a, &b)
}

/// Row-by-row dynamic programming with two rolling rows.
///
/// The shorter sequence is used for the rows, so memory is
/// O(min(len(a), len(b))).
fn distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if inner.is_empty() {
        return outer.len();
    }

    let mut prev: Vec<usize> = (0..=inner.len()).collect();
    let mut curr: Vec<usize> = vec![0; inner.len() + 1];

    for (i, x) in outer.iter().enumerate() {
        curr[0] = i + 1;
        for (j, y) in inner.iter().enumerate() {
            let insertion = prev[j + 1] + 1;
            let deletion = curr[j] + 1;
            let substitution = prev[j] + usize::from(x != y);
            curr[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "äöå"), 3);
    }

    #[test]
    fn equal_strings() {
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("käännös", "käännös"), 0);
    }

    #[test]
    fn classic_examples() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn counts_code_points_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("naïve", "naive"), 1);
        // Three-byte and four-byte code points.
        assert_eq!(edit_distance("日本語", "日本"), 1);
        assert_eq!(edit_distance("a😀b", "ab"), 1);
        assert_eq!(edit_distance("😀", "😁"), 1);
    }

    #[test]
    fn precomputed_lengths() {
        assert_eq!(levenshtein("Tervetuloa", "Tervetulo", 10, 9), 1);
        assert_eq!(levenshtein("", "ääni", 0, 4), 4);
    }

    #[test]
    fn long_ascii_uses_general_path() {
        let a = "a".repeat(300);
        let b = format!("{}b", "a".repeat(299));
        assert_eq!(edit_distance(&a, &b), 1);
        assert_eq!(char_levenshtein(&a, &b), 1);
    }

    #[test]
    fn fast_path_matches_general_path() {
        let pairs = [
            ("kitten", "sitting"),
            ("Add to watchlist", "Remove from watchlist"),
            ("abc", "cba"),
            ("x", "yyyyyy"),
        ];
        for (a, b) in pairs {
            assert_eq!(edit_distance(a, b), char_levenshtein(a, b), "{a} / {b}");
        }
    }

    #[test]
    fn symmetric_on_unequal_lengths() {
        assert_eq!(edit_distance("ab", "xaybz"), edit_distance("xaybz", "ab"));
    }
}
