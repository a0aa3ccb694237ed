//! Example: Generate candidates for a user
//!
//! Run with: cargo run --package sources --example generate_candidates
//!
//! This example shows how to:
//! 1. Load the rating dataset
//! 2. Derive stats and the user-movie matrix
//! 3. Generate average and collaborative candidates
//! 4. Display the results

use data_loader::{MovieStatsTable, RatingDataset, UserMovieMatrix};
use sources::{user_context::build_user_context, AverageSource, CollaborativeSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,sources=debug")
        .init();

    println!("=== Candidate Generation Example ===\n");

    println!("Loading rating dataset...");
    let start = Instant::now();
    let dataset = Arc::new(RatingDataset::load_from_files(Path::new("data"))?);
    let stats = Arc::new(MovieStatsTable::compute(&dataset));
    let matrix = Arc::new(UserMovieMatrix::build(&dataset));
    println!("Loaded and derived artifacts in {:?}\n", start.elapsed());

    let user_id = 1;
    let context = build_user_context(&dataset, user_id);
    println!("Target User: {}", user_id);
    println!("  Watched movies: {}", context.watched_movies.len());
    if let Some(avg) = dataset.user_avg_rating(user_id) {
        println!("  Avg rating: {:.2}", avg);
    }
    println!();

    // Collaborative candidates
    let collaborative = CollaborativeSource::new(dataset.clone(), matrix.clone(), stats.clone());
    let start = Instant::now();
    let neighbors = collaborative.neighborhood(user_id);
    let mut personal = collaborative.get_candidates(&context);
    let collaborative_time = start.elapsed();
    personal.sort_by(|a, b| b.score.total_cmp(&a.score));

    println!(
        "Generated {} collaborative candidates from {} neighbors in {:?}",
        personal.len(),
        neighbors.len(),
        collaborative_time
    );
    println!("\nTop 5 Collaborative Candidates (unfiltered):");
    for (i, candidate) in personal.iter().take(5).enumerate() {
        let title = dataset.title(candidate.movie_id).unwrap_or("?");
        println!("  {}. {} (Score: {:.3})", i + 1, title, candidate.score);
        if let Some(count) = candidate.metadata.neighbor_count {
            println!("     - Rated by {} neighbors", count);
        }
    }

    // Average candidates
    let average = AverageSource::new(stats.clone());
    let start = Instant::now();
    let mut popular = average.get_candidates();
    let average_time = start.elapsed();
    popular.retain(|c| c.metadata.rating_count.unwrap_or(0) >= 50);
    popular.sort_by(|a, b| b.score.total_cmp(&a.score));

    println!("\nTop 5 Average Candidates (>= 50 ratings):");
    for (i, candidate) in popular.iter().take(5).enumerate() {
        let title = dataset.title(candidate.movie_id).unwrap_or("?");
        println!("  {}. {} (Mean: {:.3})", i + 1, title, candidate.score);
    }

    println!("\n=== Summary ===");
    println!("Collaborative time: {:?}", collaborative_time);
    println!("Average time: {:?}", average_time);

    Ok(())
}
