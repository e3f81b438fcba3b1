//! Property tests for edit distance and suggestion ranking.

use proptest::prelude::*;
use translate_core::{Candidate, Suggestion};
use translate_ttm::levenshtein::char_levenshtein;
use translate_ttm::{edit_distance, levenshtein, rank_suggestions};

/// Short strings mixing ASCII with multi-byte code points.
fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::char::range('a', 'e'),
            Just('ä'),
            Just('ö'),
            Just('日'),
            Just('😀'),
        ],
        0..12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn ascii_text() -> impl Strategy<Value = String> {
    "[a-d ]{0,40}"
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(a in text()) {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }

    #[test]
    fn distance_is_symmetric(a in text(), b in text()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn triangle_inequality(a in text(), b in text(), c in text()) {
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    #[test]
    fn distance_is_bounded_by_lengths(a in text(), b in text()) {
        let la = a.chars().count();
        let lb = b.chars().count();
        let d = edit_distance(&a, &b);
        prop_assert!(d >= la.abs_diff(lb));
        prop_assert!(d <= la.max(lb));
    }

    #[test]
    fn zero_distance_only_for_equal_strings(a in text(), b in text()) {
        prop_assert_eq!(edit_distance(&a, &b) == 0, a == b);
    }

    #[test]
    fn fast_path_agrees_with_code_point_path(a in ascii_text(), b in ascii_text()) {
        prop_assert_eq!(edit_distance(&a, &b), char_levenshtein(&a, &b));
    }

    #[test]
    fn precomputed_lengths_agree(a in text(), b in text()) {
        let la = a.chars().count();
        let lb = b.chars().count();
        prop_assert_eq!(levenshtein(&a, &b, la, lb), edit_distance(&a, &b));
    }

    #[test]
    fn ranking_is_sorted_stable_permutation(qualities in prop::collection::vec(0u8..=4, 0..20)) {
        let input: Vec<Suggestion<usize>> = qualities
            .iter()
            .enumerate()
            .map(|(i, q)| Suggestion::new(Candidate::new(format!("s{i}"), i), f64::from(*q) / 4.0).unwrap())
            .collect();
        let ranked = rank_suggestions(input.clone());

        prop_assert_eq!(ranked.len(), input.len());
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.quality() >= b.quality());
            if a.quality() == b.quality() {
                prop_assert!(a.metadata() < b.metadata());
            }
        }
        let mut seen: Vec<usize> = ranked.iter().map(|s| *s.metadata()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..input.len()).collect::<Vec<_>>());
    }
}
