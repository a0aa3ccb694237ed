//! Dense user x movie interaction matrix.
//!
//! Rows are distinct user ids, columns are distinct movie ids, both in
//! ascending order. A cell holds the user's rating for the movie or `0.0`
//! when the pair was never observed. Because real ratings are strictly
//! positive, `0.0` always means "no rating".

use crate::types::*;
use std::collections::HashMap;

/// Value stored for an unobserved (user, movie) pair
pub const UNRATED: f64 = 0.0;

#[derive(Debug, Clone, Default)]
pub struct UserMovieMatrix {
    users: Vec<UserId>,
    movies: Vec<MovieId>,
    user_pos: HashMap<UserId, usize>,
    movie_pos: HashMap<MovieId, usize>,
    /// Row-major, `users.len() * movies.len()` cells
    values: Vec<f64>,
}

impl UserMovieMatrix {
    /// Build the matrix from a dataset.
    ///
    /// One cell per observed pair; when a pair occurs more than once the
    /// last rating in dataset order wins.
    pub fn build(dataset: &RatingDataset) -> Self {
        let mut users: Vec<UserId> = dataset.ratings().iter().map(|r| r.user_id).collect();
        users.sort_unstable();
        users.dedup();

        let mut movies: Vec<MovieId> = dataset.ratings().iter().map(|r| r.movie_id).collect();
        movies.sort_unstable();
        movies.dedup();

        let user_pos: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let movie_pos: HashMap<MovieId, usize> =
            movies.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        let width = movies.len();
        let mut values = vec![UNRATED; users.len() * width];
        for rating in dataset.ratings() {
            let row = user_pos[&rating.user_id];
            let col = movie_pos[&rating.movie_id];
            values[row * width + col] = rating.rating;
        }

        Self {
            users,
            movies,
            user_pos,
            movie_pos,
            values,
        }
    }

    /// Row ids in ascending order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Column ids in ascending order
    pub fn movies(&self) -> &[MovieId] {
        &self.movies
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_pos.contains_key(&user_id)
    }

    pub fn user_index(&self, user_id: UserId) -> Option<usize> {
        self.user_pos.get(&user_id).copied()
    }

    pub fn movie_index(&self, movie_id: MovieId) -> Option<usize> {
        self.movie_pos.get(&movie_id).copied()
    }

    /// The full rating vector of a user, aligned with `movies()`
    pub fn row(&self, user_id: UserId) -> Option<&[f64]> {
        self.user_index(user_id).map(|i| self.row_at(i))
    }

    /// Row by position
    pub fn row_at(&self, index: usize) -> &[f64] {
        let width = self.movies.len();
        &self.values[index * width..(index + 1) * width]
    }

    /// Cell value by position
    pub fn value_at(&self, user_index: usize, movie_index: usize) -> f64 {
        self.values[user_index * self.movies.len() + movie_index]
    }

    /// Rating for a pair, `UNRATED` for unknown users, movies, or pairs
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> f64 {
        match (self.user_index(user_id), self.movie_index(movie_id)) {
            (Some(u), Some(m)) => self.value_at(u, m),
            _ => UNRATED,
        }
    }

    /// Ratings of one movie restricted to the given users, in the order given
    pub fn column<'a>(
        &'a self,
        movie_id: MovieId,
        users: &'a [UserId],
    ) -> impl Iterator<Item = (UserId, f64)> + 'a {
        let col = self.movie_index(movie_id);
        users.iter().map(move |&user_id| {
            let value = match (col, self.user_index(user_id)) {
                (Some(m), Some(u)) => self.value_at(u, m),
                _ => UNRATED,
            };
            (user_id, value)
        })
    }

    /// Movies the user has a non-zero entry for
    pub fn rated_movies(&self, user_id: UserId) -> Vec<MovieId> {
        self.row(user_id)
            .map(|row| {
                row.iter()
                    .zip(&self.movies)
                    .filter(|(value, _)| **value > UNRATED)
                    .map(|(_, &movie_id)| movie_id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.users.len(), self.movies.len())
    }
}
