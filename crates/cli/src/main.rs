mod chart;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::UserId;
use engine::{
    RecommendConfig, RecommendRequest, RecommendationEngine, RecommendationList, Strategy,
    DEFAULT_MIN_RATINGS, DEFAULT_TOP_N,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// movie-recs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendations from average ratings or similar users", long_about = None)]
struct Cli {
    /// Directory containing ratings.csv and movies.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Recommender to run: average or collaborative
        #[arg(long, default_value = "average")]
        strategy: Strategy,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        limit: usize,

        /// Minimum number of ratings a movie needs to be eligible
        #[arg(long, default_value_t = DEFAULT_MIN_RATINGS)]
        min_ratings: u32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Print a bar chart of the scores
        #[arg(long)]
        chart: bool,
    },

    /// Show a user's rating history
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Recommender to benchmark
        #[arg(long, default_value = "collaborative")]
        strategy: Strategy,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let engine = Arc::new(
        RecommendationEngine::from_files(&cli.data_dir).context("Failed to load movie dataset")?,
    );
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend {
            user_id,
            strategy,
            limit,
            min_ratings,
            json,
            chart,
        } => {
            let config = RecommendConfig::default()
                .with_top_n(limit)
                .with_min_ratings(min_ratings);
            let request = RecommendRequest::new(user_id, strategy).with_config(config);
            handle_recommend(&engine, &request, json, chart)?
        }
        Commands::User { user_id } => handle_user(&engine, user_id)?,
        Commands::Search { title } => handle_search(&engine, &title)?,
        Commands::Benchmark {
            requests,
            concurrent,
            strategy,
        } => handle_benchmark(engine, requests, concurrent, strategy).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    request: &RecommendRequest,
    json: bool,
    chart: bool,
) -> Result<()> {
    let list = engine.recommend(request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.is_empty() {
        println!(
            "{} No recommendations for user {} ({} strategy)",
            "ℹ".blue(),
            request.user_id,
            request.strategy
        );
        return Ok(());
    }

    print_recommendations(&list);
    if chart {
        println!();
        print!("{}", chart::render(&list, chart::BAR_WIDTH));
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(engine: &RecommendationEngine, user_id: UserId) -> Result<()> {
    let dataset = engine.dataset();
    if !dataset.contains_user(user_id) {
        return Err(anyhow!("User {} not found", user_id));
    }
    let ratings = dataset.get_user_ratings(user_id);

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    println!("{}Number of ratings: {}", "• ".cyan(), ratings.len());
    if let Some(avg) = dataset.user_avg_rating(user_id) {
        println!("{}Average rating: {:.2}", "• ".cyan(), avg);
    }

    let mut top_rated: Vec<_> = ratings.iter().collect();
    top_rated.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.movie_id.cmp(&b.movie_id)));
    println!("Top rated movies:");
    for rating in top_rated.iter().take(10) {
        println!("  - {} (Rating: {})", rating.title, rating.rating);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(engine: &RecommendationEngine, title: &str) -> Result<()> {
    let needle = title.to_lowercase();
    let stats = engine.stats();

    // (exact match first, movie id, title, avg, count)
    let mut matches: Vec<(bool, u32, &str, f64, u32)> = engine
        .dataset()
        .titles()
        .filter_map(|(movie_id, movie_title)| {
            let lower = movie_title.to_lowercase();
            if !lower.contains(&needle) {
                return None;
            }
            let (avg, count) = stats
                .get(movie_id)
                .map(|s| (s.avg_rating, s.rating_count))
                .unwrap_or((0.0, 0));
            Some((lower == needle, movie_id, movie_title, avg, count))
        })
        .collect();

    matches.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| b.4.cmp(&a.4))
            .then_with(|| a.1.cmp(&b.1))
    });

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  no matching titles");
    }
    for (_, movie_id, movie_title, avg, count) in matches.iter().take(20) {
        println!("{}: {} avg {:.2} ({} ratings)", movie_id, movie_title, avg, count);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: Arc<RecommendationEngine>,
    requests: usize,
    concurrent: usize,
    strategy: Strategy,
) -> Result<()> {
    let users = engine.dataset().user_ids();
    if users.is_empty() || requests == 0 {
        return Err(anyhow!("Nothing to benchmark"));
    }

    let user_ids: Vec<UserId> = (0..requests)
        .map(|_| users[rand::random_range(0..users.len())])
        .collect();

    // Bound the number of in-flight requests
    let permits = Arc::new(tokio::sync::Semaphore::new(concurrent.max(1)));
    let bench_start = Instant::now();

    let mut handles = Vec::with_capacity(requests);
    for user_id in user_ids {
        let engine = engine.clone();
        let permit = permits.clone().acquire_owned().await?;
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            engine.recommend(&RecommendRequest::new(user_id, strategy))?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await.context("Benchmark task panicked")??);
    }
    let wall_time = bench_start.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Strategy: {}", strategy);
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of sorted timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let index = ((sorted.len() as f64 * p) as usize).min(sorted.len().saturating_sub(1));
    sorted.get(index).copied().unwrap_or_default()
}

/// Print a ranked table of recommendations
fn print_recommendations(list: &RecommendationList) {
    println!(
        "{}",
        format!("Movie Recommendations ({}):", list.strategy).bold().blue()
    );
    println!("     {:<50} {}", "title", list.score_kind.label());
    for (rank, item) in list.items.iter().enumerate() {
        println!(
            "{:>3}. {:<50} {:.2}",
            (rank + 1).to_string().green(),
            item.title,
            item.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let timings: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();
        assert_eq!(percentile(&timings, 0.50), Duration::from_millis(51));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(100));
        assert_eq!(percentile(&[], 0.95), Duration::ZERO);
    }

    #[test]
    fn test_parse_recommend_args() {
        let cli = Cli::parse_from([
            "movie-recs",
            "--data-dir",
            "fixtures",
            "recommend",
            "--user-id",
            "7",
            "--strategy",
            "collaborative",
            "--min-ratings",
            "5",
        ]);
        assert_eq!(cli.data_dir, PathBuf::from("fixtures"));
        match cli.command {
            Commands::Recommend {
                user_id,
                strategy,
                limit,
                min_ratings,
                ..
            } => {
                assert_eq!(user_id, 7);
                assert_eq!(strategy, Strategy::Collaborative);
                assert_eq!(limit, DEFAULT_TOP_N);
                assert_eq!(min_ratings, 5);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        let parsed = Cli::try_parse_from([
            "movie-recs",
            "recommend",
            "--user-id",
            "1",
            "--strategy",
            "popular",
        ]);
        assert!(parsed.is_err());
    }
}
