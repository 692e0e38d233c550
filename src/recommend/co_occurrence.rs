//! "Users also liked" recommendations
//!
//! Starting from one item, every user who rated it contributes their ratings
//! of all other items. An item's score is the sum of those ratings, so items
//! that many of the seed's raters liked float to the top.

use crate::recommend::{by_score_desc, Ranker, TopRated};
use crate::types::{ItemKey, UserId, UserRatings};
use std::collections::HashMap;
use tracing::debug;

/// Summed ratings of every item co-rated with `item`, best first
///
/// The seed item itself is never scored. Equal sums fall back to ascending
/// item key order.
pub fn also_liked_scores(item: &ItemKey, ratings: &UserRatings) -> Vec<(ItemKey, f64)> {
    let mut scores: HashMap<ItemKey, f64> = HashMap::new();
    let mut raters = 0usize;

    for rated in ratings.values().filter(|rated| rated.contains_key(item)) {
        raters += 1;
        for (other, rating) in rated {
            if other != item {
                *scores.entry(*other).or_insert(0.0) += rating;
            }
        }
    }

    debug!(
        "{}: {} raters, {} co-rated items",
        item,
        raters,
        scores.len()
    );

    let mut scored: Vec<(ItemKey, f64)> = scores.into_iter().collect();
    scored.sort_by(|a, b| by_score_desc(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
    scored
}

/// The `n` items best liked by the users who rated `item`
pub fn users_also_liked(item: &ItemKey, ratings: &UserRatings, n: usize) -> Vec<ItemKey> {
    also_liked_scores(item, ratings)
        .into_iter()
        .take(n)
        .map(|(key, _)| key)
        .collect()
}

/// Item-based ranker seeded from the user's favourite item
///
/// The seed is the user's top-rated item. Items the user already rated are
/// skipped, so only new items are predicted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoOccurrence;

impl Ranker for CoOccurrence {
    fn name(&self) -> &'static str {
        "co-occurrence"
    }

    fn rank(&self, user_id: UserId, ratings: &UserRatings, n: usize) -> Vec<ItemKey> {
        let Some(seed) = TopRated.rank(user_id, ratings, 1).into_iter().next() else {
            return Vec::new();
        };
        let Some(rated) = ratings.get(&user_id) else {
            return Vec::new();
        };

        also_liked_scores(&seed, ratings)
            .into_iter()
            .filter(|(item, _)| !rated.contains_key(item))
            .take(n)
            .map(|(item, _)| item)
            .collect()
    }
}
