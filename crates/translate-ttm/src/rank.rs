// Suggestion quality and ranking
// Origin: ttmserver/TTMServer.php

use translate_core::Suggestion;

/// Weight of the edit distance in the quality formula. Keeps a single edit
/// in a short string from pushing the quality all the way to zero.
const DISTANCE_WEIGHT: f64 = 0.9;

/// Similarity of two strings given their edit distance.
///
/// `1 - 0.9 * distance / min(len_a, len_b)`, clamped to `[0, 1]`. Two empty
/// strings are identical (quality 1); one empty string against a non-empty
/// one has quality 0.
pub fn quality(len_a: usize, len_b: usize, distance: usize) -> f64 {
    let shorter = len_a.min(len_b);
    if shorter == 0 {
        return if len_a == len_b { 1.0 } else { 0.0 };
    }
    let q = 1.0 - DISTANCE_WEIGHT * distance as f64 / shorter as f64;
    q.clamp(0.0, 1.0)
}

/// Sort suggestions by quality, best first.
///
/// The sort is stable: suggestions with equal quality keep their input
/// order. Qualities are never modified.
pub fn rank_suggestions<M>(mut suggestions: Vec<Suggestion<M>>) -> Vec<Suggestion<M>> {
    sort_suggestions(&mut suggestions);
    suggestions
}

/// In-place variant of [`rank_suggestions`].
pub fn sort_suggestions<M>(suggestions: &mut [Suggestion<M>]) {
    // Qualities are validated to [0, 1], so total_cmp orders them numerically.
    suggestions.sort_by(|a, b| b.quality().total_cmp(&a.quality()));
}
