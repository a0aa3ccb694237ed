//! Helper functions to build a UserContext for one request.
//!
//! The two recommenders look at "already watched" from different places:
//! the average path reads the raw dataset, the collaborative path reads the
//! user's matrix row. For a well-formed dataset both give the same set.

use crate::types::UserContext;
use data_loader::{RatingDataset, UserId, UserMovieMatrix};

/// Build a context from the raw dataset.
///
/// A user who never rated anything gets an empty watched set; this is not
/// an error.
pub fn build_user_context(dataset: &RatingDataset, user_id: UserId) -> UserContext {
    let mut context = UserContext::new(user_id);
    context.watched_movies = dataset.watched_movies(user_id);
    context
}

/// Build a context from the user's matrix row.
///
/// Returns `None` when the user has no row, which the collaborative path
/// treats as "nothing to recommend".
pub fn build_matrix_context(matrix: &UserMovieMatrix, user_id: UserId) -> Option<UserContext> {
    if !matrix.contains_user(user_id) {
        return None;
    }

    let mut context = UserContext::new(user_id);
    context.watched_movies = matrix.rated_movies(user_id).into_iter().collect();
    Some(context)
}
