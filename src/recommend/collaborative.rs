//! User-based collaborative filtering
//!
//! Neighbours are other users with a positive Pearson correlation over
//! co-rated items. An unrated item's score is the similarity-weighted mean of
//! the neighbours' ratings for it.

use crate::recommend::{by_score_desc, Ranker};
use crate::types::{ItemKey, Rating, UserId, UserRatings};
use std::collections::HashMap;
use tracing::debug;

/// Default number of most similar users consulted per prediction
pub const DEFAULT_NEIGHBOURS: usize = 20;

/// Pearson correlation between two users over their co-rated items
///
/// Returns 0.0 when they share no items or either side has zero variance.
pub fn pearson_correlation(a: &HashMap<ItemKey, Rating>, b: &HashMap<ItemKey, Rating>) -> f64 {
    let mut n = 0.0;
    let (mut sum_a, mut sum_b) = (0.0, 0.0);
    let (mut sum_a_sq, mut sum_b_sq, mut sum_ab) = (0.0, 0.0, 0.0);

    for (key, ra) in a {
        let Some(rb) = b.get(key) else { continue };
        n += 1.0;
        sum_a += ra;
        sum_b += rb;
        sum_a_sq += ra * ra;
        sum_b_sq += rb * rb;
        sum_ab += ra * rb;
    }

    if n == 0.0 {
        return 0.0;
    }

    let numerator = n * sum_ab - sum_a * sum_b;
    let denominator = ((n * sum_a_sq - sum_a * sum_a) * (n * sum_b_sq - sum_b * sum_b)).sqrt();

    if denominator == 0.0 || denominator.is_nan() {
        return 0.0;
    }
    numerator / denominator
}

/// Collaborative-filtering ranker
#[derive(Debug, Clone, Copy)]
pub struct Collaborative {
    neighbours: usize,
}

impl Collaborative {
    pub fn new(neighbours: usize) -> Self {
        Self { neighbours }
    }

    /// Predicted score for every item the user has not rated, best first
    pub fn predict(&self, user_id: UserId, ratings: &UserRatings) -> Vec<(ItemKey, f64)> {
        let Some(target) = ratings.get(&user_id) else {
            return Vec::new();
        };

        let mut similar: Vec<(UserId, f64)> = ratings
            .iter()
            .filter(|(other, _)| **other != user_id)
            .map(|(other, theirs)| (*other, pearson_correlation(target, theirs)))
            .filter(|(_, sim)| *sim > 0.0)
            .collect();
        similar.sort_by(|a, b| by_score_desc(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
        similar.truncate(self.neighbours);

        debug!(
            "User {}: {} positively correlated neighbours",
            user_id,
            similar.len()
        );

        let mut weighted: HashMap<ItemKey, (f64, f64)> = HashMap::new();
        for (other, sim) in &similar {
            for (item, rating) in &ratings[other] {
                if target.contains_key(item) {
                    continue;
                }
                let entry = weighted.entry(*item).or_insert((0.0, 0.0));
                entry.0 += rating * sim;
                entry.1 += sim;
            }
        }

        let mut predicted: Vec<(ItemKey, f64)> = weighted
            .into_iter()
            .map(|(item, (score, sim_sum))| (item, score / sim_sum))
            .collect();
        predicted.sort_by(|a, b| by_score_desc(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
        predicted
    }
}

impl Default for Collaborative {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBOURS)
    }
}

impl Ranker for Collaborative {
    fn name(&self) -> &'static str {
        "collaborative"
    }

    fn rank(&self, user_id: UserId, ratings: &UserRatings, n: usize) -> Vec<ItemKey> {
        self.predict(user_id, ratings)
            .into_iter()
            .take(n)
            .map(|(item, _)| item)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn book(id: i64) -> ItemKey {
        ItemKey::new(Category::Book, id)
    }

    fn ratings(rows: &[(UserId, i64, f64)]) -> UserRatings {
        let mut map = UserRatings::new();
        for (user, id, rating) in rows {
            map.entry(*user).or_default().insert(book(*id), *rating);
        }
        map
    }

    #[test]
    fn test_pearson_identical_users() {
        let r = ratings(&[(1, 1, 1.0), (1, 2, 3.0), (1, 3, 5.0)]);
        let sim = pearson_correlation(&r[&1], &r[&1]);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_opposite_users() {
        let r = ratings(&[
            (1, 1, 1.0),
            (1, 2, 3.0),
            (1, 3, 5.0),
            (2, 1, 5.0),
            (2, 2, 3.0),
            (2, 3, 1.0),
        ]);
        let sim = pearson_correlation(&r[&1], &r[&2]);
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_degenerate_cases() {
        let r = ratings(&[(1, 1, 4.0), (2, 2, 4.0), (3, 1, 4.0)]);
        assert_eq!(pearson_correlation(&r[&1], &r[&2]), 0.0, "no co-rated items");
        assert_eq!(pearson_correlation(&r[&1], &r[&3]), 0.0, "zero variance");
    }

    #[test]
    fn test_recommends_unrated_items_from_similar_users() {
        let r = ratings(&[
            (1, 1, 5.0),
            (1, 2, 1.0),
            (2, 1, 5.0),
            (2, 2, 1.0),
            (2, 3, 4.0),
            (2, 4, 2.0),
            // negatively correlated, ignored
            (3, 1, 1.0),
            (3, 2, 5.0),
            (3, 5, 5.0),
        ]);

        let ranked = Collaborative::default().rank(1, &r, 10);
        assert_eq!(ranked, vec![book(3), book(4)]);
    }

    #[test]
    fn test_unknown_user_gets_nothing() {
        let r = ratings(&[(1, 1, 5.0)]);
        assert!(Collaborative::default().rank(9, &r, 3).is_empty());
    }

    #[test]
    fn test_neighbour_limit() {
        let r = ratings(&[
            (1, 1, 5.0),
            (1, 2, 1.0),
            (2, 1, 5.0),
            (2, 2, 1.0),
            (2, 3, 4.0),
            (3, 1, 4.0),
            (3, 2, 2.0),
            (3, 4, 5.0),
        ]);

        // both neighbours correlate at 1.0; the lower user id wins the tie
        let ranked = Collaborative::new(1).rank(1, &r, 10);
        assert_eq!(ranked, vec![book(3)]);
    }
}
