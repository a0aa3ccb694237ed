//! User-user similarity for the collaborative source.
//!
//! ## Algorithm
//! 1. Pearson correlation between the target's matrix row and every other
//!    row, over the full column space. Unrated cells (`0.0`) take part as
//!    ordinary values.
//! 2. Undefined correlations (a flat row) and correlations <= 0 are dropped,
//!    as is the target itself.
//! 3. Survivors are rescaled linearly into [0.5, 1.0].
//! 4. The strongest `k` become the neighborhood.
//!
//! Step 1 counts "both users skipped this movie" as agreement. That is a
//! known accuracy weakness of dense correlation; it is kept so scores match
//! the established behaviour of this recommender.

use data_loader::{UserId, UserMovieMatrix};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Lower bound of the normalized weight range
pub const MIN_WEIGHT: f64 = 0.5;

/// Upper bound of the normalized weight range
pub const MAX_WEIGHT: f64 = 1.0;

/// A user in the target's neighborhood
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user_id: UserId,
    /// Row position in the matrix
    pub index: usize,
    /// Raw Pearson correlation, in (0, 1]
    pub similarity: f64,
    /// Normalized weight, in [0.5, 1.0]
    pub weight: f64,
}

/// A mean-centered vector with its Euclidean norm
struct Centered {
    deviations: Vec<f64>,
    norm: f64,
}

impl Centered {
    /// `None` for an empty or constant vector
    fn new(values: &[f64]) -> Option<Self> {
        if is_flat(values) {
            return None;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let deviations: Vec<f64> = values.iter().map(|v| v - mean).collect();
        let norm = deviations.iter().map(|d| d * d).sum::<f64>().sqrt();
        (norm > 0.0).then_some(Self { deviations, norm })
    }

    fn correlate(&self, other: &[f64]) -> Option<f64> {
        if other.len() != self.deviations.len() || is_flat(other) {
            return None;
        }
        let mean = other.iter().sum::<f64>() / other.len() as f64;

        let mut covariance = 0.0;
        let mut sum_sq = 0.0;
        for (dx, y) in self.deviations.iter().zip(other) {
            let dy = y - mean;
            covariance += dx * dy;
            sum_sq += dy * dy;
        }

        let denom = self.norm * sum_sq.sqrt();
        if denom == 0.0 {
            return None;
        }
        let r = covariance / denom;
        r.is_finite().then(|| r.clamp(-1.0, 1.0))
    }
}

fn is_flat(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

/// Pearson correlation of two equally long vectors.
///
/// `None` when either vector is empty or constant, or lengths differ.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    Centered::new(x)?.correlate(y)
}

/// Positive correlations between `user_id` and every other matrix row.
///
/// Result is in matrix row order. Empty when the user has no row or their
/// row is constant.
pub fn positive_similarities(matrix: &UserMovieMatrix, user_id: UserId) -> Vec<(UserId, usize, f64)> {
    let Some(target_index) = matrix.user_index(user_id) else {
        return Vec::new();
    };
    let Some(target) = Centered::new(matrix.row_at(target_index)) else {
        return Vec::new();
    };

    matrix
        .users()
        .par_iter()
        .enumerate()
        .filter(|&(index, _)| index != target_index)
        .filter_map(|(index, &other)| {
            let r = target.correlate(matrix.row_at(index))?;
            (r > 0.0).then_some((other, index, r))
        })
        .collect()
}

/// Rescale similarities into [MIN_WEIGHT, MAX_WEIGHT].
///
/// When all survivors share one value (including a single survivor) the
/// range is empty and every weight is MAX_WEIGHT.
pub fn normalize(similarities: &[(UserId, usize, f64)]) -> Vec<Neighbor> {
    let min = similarities
        .iter()
        .map(|s| s.2)
        .fold(f64::INFINITY, f64::min);
    let max = similarities
        .iter()
        .map(|s| s.2)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    similarities
        .iter()
        .map(|&(user_id, index, similarity)| {
            let weight = if span > 0.0 {
                (similarity - min) / span * (MAX_WEIGHT - MIN_WEIGHT) + MIN_WEIGHT
            } else {
                MAX_WEIGHT
            };
            Neighbor {
                user_id,
                index,
                similarity,
                weight,
            }
        })
        .collect()
}

/// Keep the `k` highest-weighted neighbors; ties go to the lower user id
pub fn select_neighbors(mut neighbors: Vec<Neighbor>, k: usize) -> Vec<Neighbor> {
    neighbors.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    neighbors.truncate(k);
    neighbors
}

/// Full neighborhood for a user: correlate, normalize, select
pub fn neighborhood(matrix: &UserMovieMatrix, user_id: UserId, k: usize) -> Vec<Neighbor> {
    let similarities = positive_similarities(matrix, user_id);
    if similarities.is_empty() {
        return Vec::new();
    }
    select_neighbors(normalize(&similarities), k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Rating, RatingDataset};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pearson_perfect_and_inverse() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(pearson(&x, &[2.0, 4.0, 6.0, 8.0]).unwrap(), 1.0));
        assert!(approx(pearson(&x, &[4.0, 3.0, 2.0, 1.0]).unwrap(), -1.0));
    }

    #[test]
    fn test_pearson_known_value() {
        // r = 0.8 for this textbook pair
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert!(approx(pearson(&x, &y).unwrap(), 0.8));
    }

    #[test]
    fn test_pearson_flat_vector_is_undefined() {
        assert!(pearson(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(pearson(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]).is_none());
        assert!(pearson(&[], &[]).is_none());
    }

    #[test]
    fn test_pearson_length_mismatch() {
        assert!(pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_normalize_range() {
        let neighbors = normalize(&[(1, 0, 0.2), (2, 1, 0.6), (3, 2, 1.0)]);

        assert!(approx(neighbors[0].weight, 0.5));
        assert!(approx(neighbors[1].weight, 0.75));
        assert!(approx(neighbors[2].weight, 1.0));
        assert!(approx(neighbors[1].similarity, 0.6));
    }

    #[test]
    fn test_normalize_single_survivor() {
        let neighbors = normalize(&[(7, 3, 0.4)]);

        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].weight, MAX_WEIGHT);
    }

    #[test]
    fn test_select_neighbors_caps_and_orders() {
        let neighbors: Vec<Neighbor> = (0..30)
            .map(|i| Neighbor {
                user_id: i,
                index: i as usize,
                similarity: 0.5,
                weight: 0.5 + (i % 10) as f64 * 0.05,
            })
            .collect();

        let selected = select_neighbors(neighbors, 20);
        assert_eq!(selected.len(), 20);
        assert!(selected.windows(2).all(|w| w[0].weight >= w[1].weight));
        // Ties resolved by user id
        assert_eq!(selected[0].user_id, 9);
        assert_eq!(selected[1].user_id, 19);
    }

    #[test]
    fn test_neighborhood_excludes_self_and_negative() {
        let dataset = RatingDataset::from_ratings(vec![
            // target
            Rating::new(1, 1, 5.0, "A"),
            Rating::new(1, 2, 4.0, "B"),
            // agrees with target
            Rating::new(2, 1, 5.0, "A"),
            Rating::new(2, 2, 4.0, "B"),
            Rating::new(2, 3, 1.0, "C"),
            // only rated D, anti-correlated with target
            Rating::new(3, 4, 5.0, "D"),
        ]);
        let matrix = UserMovieMatrix::build(&dataset);

        let neighbors = neighborhood(&matrix, 1, 20);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].user_id, 2);
        assert_eq!(neighbors[0].weight, MAX_WEIGHT);
    }

    #[test]
    fn test_neighborhood_unknown_user() {
        let dataset = RatingDataset::from_ratings(vec![Rating::new(1, 1, 5.0, "A")]);
        let matrix = UserMovieMatrix::build(&dataset);

        assert!(neighborhood(&matrix, 42, 20).is_empty());
    }
}
