//! Offline evaluation of recommendations.
//!
//! For every user with a ground-truth set, a [`Ranker`](crate::recommend::Ranker)
//! predicts as many items as the set holds, and the prediction is scored with
//! the set-overlap miss rate. Scores are averaged over the users that could be
//! evaluated.
//!
//! # Components
//!
//! - **metrics**: the per-user [`overlap_error`]
//! - **evaluator**: [`evaluate`] / [`evaluate_with`] aggregation
//! - **ground_truth**: providers of the `user → item set` mapping
//!
//! # Empty-denominator guards
//!
//! Both averages in this module fall back to the maximal error of `1.0`
//! instead of dividing by zero: an empty ground-truth set for one user, and
//! zero evaluated users overall.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mediarec_core::evaluation::{evaluate, AboveAverage, GroundTruthSource};
//! use mediarec_core::loader::load_user_ratings;
//! use mediarec_core::storage::sqlite::SqliteStore;
//! use mediarec_core::types::{Category, SourceTable};
//!
//! # fn example() -> mediarec_core::Result<()> {
//! let store = SqliteStore::new("database.db");
//! let ratings = load_user_ratings(&store, &SourceTable::defaults())?;
//! let truth = AboveAverage::new(&store, &ratings, Category::ALL.to_vec()).load()?;
//!
//! println!("Average Recommendation Error: {:.2}", evaluate(&ratings, &truth));
//! # Ok(())
//! # }
//! ```

pub mod evaluator;
pub mod ground_truth;
pub mod metrics;

pub use evaluator::{evaluate, evaluate_with, EvaluationReport, UserError};
pub use ground_truth::{AboveAverage, GroundTruthSource, JsonFile, LabelledTable, Static};
pub use metrics::overlap_error;
