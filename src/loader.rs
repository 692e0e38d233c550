//! Ratings loader
//!
//! Pulls every configured review source through a [`ReviewStore`] and folds
//! the tagged rows into one per-user mapping.

use crate::error::Result;
use crate::storage::ReviewStore;
use crate::types::{RatingRecord, SourceTable, UserRatings};
use tracing::{debug, info};

/// Load all ratings from `sources` and merge them per user
pub fn load_user_ratings<S: ReviewStore + ?Sized>(
    store: &S,
    sources: &[SourceTable],
) -> Result<UserRatings> {
    let records = store.fetch_reviews(sources)?;
    let ratings = merge_records(records);

    info!(
        "Loaded ratings for {} users ({} items rated)",
        ratings.len(),
        ratings.values().map(|items| items.len()).sum::<usize>()
    );
    Ok(ratings)
}

/// Fold records into the per-user mapping; later duplicates win
pub fn merge_records<I>(records: I) -> UserRatings
where
    I: IntoIterator<Item = RatingRecord>,
{
    let mut ratings = UserRatings::new();

    for record in records {
        let previous = ratings
            .entry(record.user_id)
            .or_default()
            .insert(record.item, record.rating);

        if let Some(previous) = previous {
            debug!(
                "Duplicate rating for user {} on {}: {} replaced by {}",
                record.user_id, record.item, previous, record.rating
            );
        }
    }

    ratings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ItemKey};

    fn record(user_id: i64, category: Category, media_id: i64, rating: f64) -> RatingRecord {
        RatingRecord {
            user_id,
            item: ItemKey::new(category, media_id),
            rating,
        }
    }

    #[test]
    fn test_merge_keeps_categories_apart() {
        let ratings = merge_records(vec![
            record(1, Category::Book, 1, 5.0),
            record(1, Category::Movie, 1, 2.0),
            record(2, Category::Game, 3, 4.0),
        ]);

        assert_eq!(ratings.len(), 2);
        let user1 = &ratings[&1];
        assert_eq!(user1.len(), 2);
        assert_eq!(user1[&ItemKey::new(Category::Book, 1)], 5.0);
        assert_eq!(user1[&ItemKey::new(Category::Movie, 1)], 2.0);
    }

    #[test]
    fn test_merge_last_write_wins() {
        let ratings = merge_records(vec![
            record(1, Category::Show, 9, 1.0),
            record(1, Category::Show, 9, 3.5),
        ]);

        assert_eq!(ratings[&1][&ItemKey::new(Category::Show, 9)], 3.5);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_records(Vec::new()).is_empty());
    }
}
