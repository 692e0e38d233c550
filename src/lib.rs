//! Mediarec - Offline Recommendation Evaluation
//!
//! Scores how well a ranking of each user's items matches a per-user set of
//! correct recommendations, using ratings for games, movies, shows and books
//! stored in a SQLite media database.
//!
//! # Architecture
//!
//! - **Types**: item keys, ratings and ground-truth mappings
//! - **Storage**: read-only SQLite access behind the [`ReviewStore`] trait
//! - **Loader**: merges the per-category review tables into one mapping
//! - **Recommend**: ranking strategies (top-rated, collaborative filtering,
//!   "users also liked" co-occurrence)
//! - **Evaluation**: set-overlap error, averaging and ground-truth providers
//!
//! # Example
//!
//! ```rust,no_run
//! use mediarec_core::evaluation::AboveAverage;
//! use mediarec_core::{
//!     evaluate, load_user_ratings, Category, GroundTruthSource, SourceTable, SqliteStore,
//! };
//!
//! fn main() -> mediarec_core::Result<()> {
//!     let store = SqliteStore::new("database.db");
//!     let ratings = load_user_ratings(&store, &SourceTable::defaults())?;
//!     let truth = AboveAverage::new(&store, &ratings, Category::ALL.to_vec()).load()?;
//!
//!     println!("Average Recommendation Error: {:.2}", evaluate(&ratings, &truth));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod evaluation;
pub mod loader;
pub mod recommend;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{EvalConfig, GroundTruthKind, Strategy};
pub use error::{EvalError, Result};
pub use evaluation::{evaluate, evaluate_with, overlap_error, EvaluationReport, GroundTruthSource};
pub use loader::load_user_ratings;
pub use recommend::{CoOccurrence, Collaborative, Ranker, TopRated};
pub use storage::{sqlite::SqliteStore, ReviewStore};
pub use types::{Category, GroundTruth, ItemKey, Rating, SourceTable, UserId, UserRatings};
