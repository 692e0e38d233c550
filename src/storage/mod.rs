//! Storage layer for mediarec
//!
//! Provides read-only access to the review and media tables. Every call on a
//! [`ReviewStore`] is one round-trip: implementations acquire whatever handle
//! they need, run their queries, and release it before returning.

pub mod sqlite;

use crate::error::{EvalError, Result};
use crate::types::{Category, Rating, RatingRecord, SourceTable, UserId};

/// Read-only source of ratings and ground-truth rows
pub trait ReviewStore {
    /// Fetch every row of every source, each source queried independently.
    ///
    /// Records are returned grouped by source, in the order `sources` lists
    /// them. No ordering is assumed within a source.
    fn fetch_reviews(&self, sources: &[SourceTable]) -> Result<Vec<RatingRecord>>;

    /// Average `rating` of each category's media table (`None` when empty)
    fn fetch_category_averages(
        &self,
        categories: &[Category],
    ) -> Result<Vec<(Category, Option<Rating>)>>;

    /// Fetch `(user_id, item_key)` rows from a labelled ground-truth table
    fn fetch_labelled_items(&self, table: &str) -> Result<Vec<(UserId, String)>>;
}

/// Reject anything that is not a plain SQL identifier
///
/// Table names come from configuration and are spliced into SQL text, so
/// they are restricted to `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(EvalError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("book_reviews").is_ok());
        assert!(validate_identifier("_tmp1").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1books").is_err());
        assert!(validate_identifier("books; DROP TABLE users").is_err());
        assert!(validate_identifier("books\"").is_err());
    }
}
