//! Ground-truth providers
//!
//! The evaluator only needs `user → set of item keys`. Where that mapping
//! comes from is a swappable [`GroundTruthSource`].

use crate::error::{EvalError, Result};
use crate::storage::ReviewStore;
use crate::types::{Category, GroundTruth, ItemKey, UserId, UserRatings};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Supplies the per-user set of correct recommendations
pub trait GroundTruthSource {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn load(&self) -> Result<GroundTruth>;
}

/// Items each user rated at or above their category's average media rating
///
/// The averages come from the `rating` column of the media tables. A
/// category whose average is NULL contributes nothing.
pub struct AboveAverage<'a, S: ReviewStore + ?Sized> {
    store: &'a S,
    ratings: &'a UserRatings,
    categories: Vec<Category>,
}

impl<'a, S: ReviewStore + ?Sized> AboveAverage<'a, S> {
    pub fn new(store: &'a S, ratings: &'a UserRatings, categories: Vec<Category>) -> Self {
        Self {
            store,
            ratings,
            categories,
        }
    }
}

impl<S: ReviewStore + ?Sized> GroundTruthSource for AboveAverage<'_, S> {
    fn name(&self) -> &'static str {
        "above-average"
    }

    fn load(&self) -> Result<GroundTruth> {
        let averages: HashMap<Category, f64> = self
            .store
            .fetch_category_averages(&self.categories)?
            .into_iter()
            .filter_map(|(category, avg)| {
                if avg.is_none() {
                    warn!("No average rating for {}, skipping category", category);
                }
                avg.map(|a| (category, a))
            })
            .collect();

        Ok(above_average(self.ratings, &averages))
    }
}

/// Select, per user, the rated items at or above their category average
pub fn above_average(ratings: &UserRatings, averages: &HashMap<Category, f64>) -> GroundTruth {
    let mut truth = GroundTruth::new();

    for (user_id, items) in ratings {
        let liked: BTreeSet<ItemKey> = items
            .iter()
            .filter(|(item, rating)| {
                averages
                    .get(&item.category)
                    .is_some_and(|avg| **rating >= *avg)
            })
            .map(|(item, _)| *item)
            .collect();

        if !liked.is_empty() {
            truth.insert(*user_id, liked);
        }
    }

    truth
}

/// `(user_id, item_key)` rows from a table in the store
pub struct LabelledTable<'a, S: ReviewStore + ?Sized> {
    store: &'a S,
    table: String,
}

impl<'a, S: ReviewStore + ?Sized> LabelledTable<'a, S> {
    pub fn new(store: &'a S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }
}

impl<S: ReviewStore + ?Sized> GroundTruthSource for LabelledTable<'_, S> {
    fn name(&self) -> &'static str {
        "table"
    }

    fn load(&self) -> Result<GroundTruth> {
        let mut truth = GroundTruth::new();
        for (user_id, raw) in self.store.fetch_labelled_items(&self.table)? {
            let item: ItemKey = raw.parse()?;
            truth.entry(user_id).or_default().insert(item);
        }

        info!(
            "Loaded ground truth for {} users from table {}",
            truth.len(),
            self.table
        );
        Ok(truth)
    }
}

/// JSON object mapping user ids to item key lists
///
/// ```json
/// { "1": ["book_1", "movie_2"], "2": ["game_7"] }
/// ```
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl GroundTruthSource for JsonFile {
    fn name(&self) -> &'static str {
        "json"
    }

    fn load(&self) -> Result<GroundTruth> {
        let content = std::fs::read_to_string(&self.path)?;
        let raw: HashMap<String, BTreeSet<ItemKey>> = serde_json::from_str(&content)?;

        let mut truth = GroundTruth::new();
        for (user, items) in raw {
            let user_id: UserId = user.trim().parse().map_err(|_| {
                EvalError::Other(format!(
                    "Invalid user id '{}' in {}",
                    user,
                    self.path.display()
                ))
            })?;
            truth.entry(user_id).or_default().extend(items);
        }

        info!(
            "Loaded ground truth for {} users from {}",
            truth.len(),
            self.path.display()
        );
        Ok(truth)
    }
}

/// Ground truth held in memory
#[derive(Debug, Clone, Default)]
pub struct Static(pub GroundTruth);

impl GroundTruthSource for Static {
    fn name(&self) -> &'static str {
        "static"
    }

    fn load(&self) -> Result<GroundTruth> {
        Ok(self.0.clone())
    }
}
