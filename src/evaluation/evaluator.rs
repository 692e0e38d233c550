//! Averaged recommendation error across users

use crate::evaluation::metrics::overlap_error;
use crate::recommend::{Ranker, TopRated};
use crate::types::{GroundTruth, ItemKey, UserId, UserRatings};
use serde::Serialize;
use tracing::{debug, info};

/// Error of a single evaluated user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserError {
    pub user_id: UserId,
    pub predicted: Vec<ItemKey>,
    pub error: f64,
}

/// Outcome of an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Mean error over evaluated users, 1.0 when none were evaluated
    pub average_error: f64,
    /// Users with ground truth but no ratings
    pub skipped_users: usize,
    pub per_user: Vec<UserError>,
}

impl EvaluationReport {
    pub fn evaluated_users(&self) -> usize {
        self.per_user.len()
    }
}

/// Average error of the top-rated ranking against `ground_truth`
pub fn evaluate(user_ratings: &UserRatings, ground_truth: &GroundTruth) -> f64 {
    evaluate_with(&TopRated, user_ratings, ground_truth).average_error
}

/// Evaluate an arbitrary ranker, keeping per-user detail
///
/// Users present in `ground_truth` but absent from `user_ratings` are
/// skipped and do not count toward the average.
pub fn evaluate_with<R: Ranker + ?Sized>(
    ranker: &R,
    user_ratings: &UserRatings,
    ground_truth: &GroundTruth,
) -> EvaluationReport {
    let mut per_user = Vec::new();
    let mut skipped_users = 0;

    for (user_id, truth) in ground_truth {
        if !user_ratings.contains_key(user_id) {
            skipped_users += 1;
            continue;
        }

        let truth: Vec<ItemKey> = truth.iter().copied().collect();
        let predicted = ranker.rank(*user_id, user_ratings, truth.len());
        let error = overlap_error(&predicted, &truth);
        debug!(
            "User {}: {} predicted, {} expected, error {:.4}",
            user_id,
            predicted.len(),
            truth.len(),
            error
        );

        per_user.push(UserError {
            user_id: *user_id,
            predicted,
            error,
        });
    }

    let average_error = if per_user.is_empty() {
        1.0
    } else {
        per_user.iter().map(|u| u.error).sum::<f64>() / per_user.len() as f64
    };

    info!(
        "Evaluated {} users with {} ranking ({} skipped): average error {:.4}",
        per_user.len(),
        ranker.name(),
        skipped_users,
        average_error
    );

    EvaluationReport {
        average_error,
        skipped_users,
        per_user,
    }
}
