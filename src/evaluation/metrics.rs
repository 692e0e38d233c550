//! Recommendation error metric
//!
//! Historically reported as a "mean absolute error", the metric is the
//! set-overlap miss rate: the share of ground-truth entries the prediction
//! failed to hit.

use std::collections::HashSet;
use std::hash::Hash;

/// `1 - |set(predicted) ∩ set(ground_truth)| / len(ground_truth)`
///
/// An empty ground truth scores the maximal error of 1.0. The result is
/// always within `[0, 1]`.
pub fn overlap_error<T: Eq + Hash>(predicted: &[T], ground_truth: &[T]) -> f64 {
    let total = ground_truth.len();
    if total == 0 {
        return 1.0;
    }

    let predicted: HashSet<&T> = predicted.iter().collect();
    let truth: HashSet<&T> = ground_truth.iter().collect();
    let hits = predicted.intersection(&truth).count();

    1.0 - hits as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_ground_truth_is_max_error() {
        assert_eq!(overlap_error(&["book_1"], &[]), 1.0);
        assert_eq!(overlap_error::<&str>(&[], &[]), 1.0);
    }

    #[test]
    fn test_perfect_overlap() {
        let truth = ["book_1", "movie_2"];
        assert_eq!(overlap_error(&truth, &truth), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let error = overlap_error(&["book_1", "show_3"], &["book_1", "movie_2"]);
        assert!((error - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicates_in_prediction_count_once() {
        let error = overlap_error(&["book_1", "book_1"], &["book_1", "movie_2"]);
        assert!((error - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = overlap_error(&["a", "b", "c"], &["c", "x"]);
        let b = overlap_error(&["c", "b", "a"], &["x", "c"]);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_error_within_unit_interval(
            predicted in proptest::collection::vec(0u8..20, 0..30),
            truth in proptest::collection::vec(0u8..20, 0..30),
        ) {
            let error = overlap_error(&predicted, &truth);
            prop_assert!((0.0..=1.0).contains(&error));
        }

        #[test]
        fn prop_self_overlap_is_zero(
            truth in proptest::collection::hash_set(0u16..1000, 1..30),
        ) {
            let truth: Vec<u16> = truth.into_iter().collect();
            prop_assert_eq!(overlap_error(&truth, &truth), 0.0);
        }
    }
}
