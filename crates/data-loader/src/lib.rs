//! # Data Loader Crate
//!
//! Loads user ratings and movie titles, joins them into a `RatingDataset`,
//! and derives the read-only artifacts the recommenders work from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, Movie, MovieStats, RatingDataset)
//! - **parser**: Parse ratings.csv / movies.csv into Rust structs
//! - **index**: Join, validate and build the dataset
//! - **stats**: Per-movie mean/count and popularity
//! - **matrix**: Dense user x movie interaction matrix
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{MovieStatsTable, RatingDataset, UserMovieMatrix};
//! use std::path::Path;
//!
//! let dataset = RatingDataset::load_from_files(Path::new("data"))?;
//! let stats = MovieStatsTable::compute(&dataset);
//! let matrix = UserMovieMatrix::build(&dataset);
//!
//! println!("User 1 rated {} movies", dataset.get_user_ratings(1).len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod stats;
pub mod matrix;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use matrix::{UNRATED, UserMovieMatrix};
pub use stats::{MoviePopularity, MovieStatsTable};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    MovieStats,
    Rating,
    RatingDataset,
    RatingRecord,
    // Constants
    MAX_RATING,
};
