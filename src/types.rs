//! Core data types for mediarec
//!
//! Ratings are keyed by a synthetic [`ItemKey`] that prefixes the media id with
//! its category tag, so ids from different media tables never collide.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// User identifier as stored in the review tables
pub type UserId = i64;

/// Rating value (the review tables store 0.5..=5.0)
pub type Rating = f64;

/// Per-user ratings: user → (item → rating)
pub type UserRatings = HashMap<UserId, HashMap<ItemKey, Rating>>;

/// Per-user set of items considered correct recommendations
///
/// Ordered so that evaluation visits users in a stable order.
pub type GroundTruth = BTreeMap<UserId, BTreeSet<ItemKey>>;

/// Media category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Game,
    Movie,
    Show,
    Book,
}

impl Category {
    /// All categories, in the order their review tables are read by default
    pub const ALL: [Category; 4] = [
        Category::Game,
        Category::Movie,
        Category::Show,
        Category::Book,
    ];

    /// Tag used as the item key prefix
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Game => "game",
            Category::Movie => "movie",
            Category::Show => "show",
            Category::Book => "book",
        }
    }

    /// Table holding user reviews for this category
    pub fn review_table(&self) -> &'static str {
        match self {
            Category::Game => "game_reviews",
            Category::Movie => "movie_reviews",
            Category::Show => "show_reviews",
            Category::Book => "book_reviews",
        }
    }

    /// Table holding the media items themselves
    pub fn media_table(&self) -> &'static str {
        match self {
            Category::Game => "games",
            Category::Movie => "movies",
            Category::Show => "shows",
            Category::Book => "books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "game" => Ok(Category::Game),
            "movie" => Ok(Category::Movie),
            "show" => Ok(Category::Show),
            "book" => Ok(Category::Book),
            other => Err(EvalError::InvalidItemKey(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }
}

/// Globally unique item identifier, rendered as `{category}_{media_id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemKey {
    pub category: Category,
    pub media_id: i64,
}

impl ItemKey {
    pub fn new(category: Category, media_id: i64) -> Self {
        Self { category, media_id }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category.tag(), self.media_id)
    }
}

impl FromStr for ItemKey {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        let (tag, id) = s
            .split_once('_')
            .ok_or_else(|| EvalError::InvalidItemKey(s.to_string()))?;
        let category = tag
            .parse::<Category>()
            .map_err(|_| EvalError::InvalidItemKey(s.to_string()))?;
        let media_id = id
            .parse::<i64>()
            .map_err(|_| EvalError::InvalidItemKey(s.to_string()))?;
        Ok(Self::new(category, media_id))
    }
}

impl TryFrom<String> for ItemKey {
    type Error = EvalError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> Self {
        key.to_string()
    }
}

/// One review row after category tagging
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub item: ItemKey,
    pub rating: Rating,
}

/// A review table paired with the category its rows belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
    pub table: String,
    pub category: Category,
}

impl SourceTable {
    pub fn new(table: impl Into<String>, category: Category) -> Self {
        Self {
            table: table.into(),
            category,
        }
    }

    /// The four review tables of the media database
    pub fn defaults() -> Vec<SourceTable> {
        Category::ALL
            .iter()
            .map(|c| SourceTable::new(c.review_table(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_display() {
        assert_eq!(ItemKey::new(Category::Book, 1).to_string(), "book_1");
        assert_eq!(ItemKey::new(Category::Show, 42).to_string(), "show_42");
    }

    #[test]
    fn test_item_key_parse() {
        let key: ItemKey = "movie_2".parse().unwrap();
        assert_eq!(key, ItemKey::new(Category::Movie, 2));
    }

    #[test]
    fn test_item_key_parse_rejects_malformed() {
        assert!("movie".parse::<ItemKey>().is_err());
        assert!("podcast_3".parse::<ItemKey>().is_err());
        assert!("book_x".parse::<ItemKey>().is_err());
    }

    #[test]
    fn test_item_key_serde_as_string() {
        let key = ItemKey::new(Category::Game, 7);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"game_7\"");

        let back: ItemKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_default_sources_cover_all_categories() {
        let sources = SourceTable::defaults();
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0], SourceTable::new("game_reviews", Category::Game));
        assert_eq!(sources[3], SourceTable::new("book_reviews", Category::Book));
    }

    #[test]
    fn test_media_tables() {
        assert_eq!(Category::Game.media_table(), "games");
        assert_eq!(Category::Book.media_table(), "books");
    }
}
