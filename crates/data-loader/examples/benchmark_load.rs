use data_loader::{MoviePopularity, MovieStatsTable, RatingDataset, UserMovieMatrix};
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading rating dataset...\n");

    let start = Instant::now();
    let dataset = RatingDataset::load_from_files(data_dir)
        .expect("Failed to load dataset");
    let load_elapsed = start.elapsed();

    let start = Instant::now();
    let stats = MovieStatsTable::compute(&dataset);
    let popularity = MoviePopularity::compute(&dataset);
    let matrix = UserMovieMatrix::build(&dataset);
    let derive_elapsed = start.elapsed();

    let (users, movies, ratings) = dataset.counts();
    let (rows, cols) = matrix.shape();

    println!("\n=== Load Complete ===");
    println!("Load time: {:?}", load_elapsed);
    println!("Derive time: {:?}", derive_elapsed);
    println!("Users: {}", users);
    println!("Movies: {} (stats for {}, popularity for {})", movies, stats.len(), popularity.len());
    println!("Ratings: {}", ratings);
    println!("Matrix: {} x {}", rows, cols);
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / load_elapsed.as_secs_f64());
}
