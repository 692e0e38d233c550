//! Ranking strategies
//!
//! A [`Ranker`] turns the rating mapping into an ordered list of item keys for
//! one user. The evaluator asks for exactly as many items as the user's
//! ground-truth set holds.

pub mod co_occurrence;
pub mod collaborative;

pub use co_occurrence::{also_liked_scores, users_also_liked, CoOccurrence};
pub use collaborative::{pearson_correlation, Collaborative};

use crate::types::{ItemKey, UserId, UserRatings};
use std::cmp::Ordering;

/// Produces a ranked prediction list for a user
pub trait Ranker {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Return at most `n` item keys, best first
    fn rank(&self, user_id: UserId, ratings: &UserRatings, n: usize) -> Vec<ItemKey>;
}

/// Ranks a user's own rated items by rating, highest first
///
/// Equal ratings fall back to ascending item key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopRated;

impl Ranker for TopRated {
    fn name(&self) -> &'static str {
        "top-rated"
    }

    fn rank(&self, user_id: UserId, ratings: &UserRatings, n: usize) -> Vec<ItemKey> {
        let Some(rated) = ratings.get(&user_id) else {
            return Vec::new();
        };

        let mut items: Vec<(&ItemKey, f64)> = rated.iter().map(|(k, r)| (k, *r)).collect();
        items.sort_by(|a, b| by_score_desc(a.1, b.1).then_with(|| a.0.cmp(b.0)));
        items.into_iter().take(n).map(|(k, _)| *k).collect()
    }
}

/// Descending order on scores; NaN sorts last
pub(crate) fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
