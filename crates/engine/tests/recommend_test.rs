//! End-to-end tests for the recommendation engine.
//!
//! These build an engine from in-memory ratings and check the behavior a
//! presentation shell relies on.

use data_loader::{Rating, RatingDataset};
use engine::{
    EngineHandle, RecommendConfig, RecommendRequest, RecommendationEngine, ScoreKind, Strategy,
};

fn request(user_id: u32, strategy: Strategy, min_ratings: u32) -> RecommendRequest {
    RecommendRequest::new(user_id, strategy)
        .with_config(RecommendConfig::default().with_min_ratings(min_ratings))
}

/// Users 1-3 over movies A, B, C
fn small_engine() -> RecommendationEngine {
    RecommendationEngine::load(RatingDataset::from_ratings(vec![
        Rating::new(1, 1, 5.0, "A"),
        Rating::new(1, 2, 4.0, "B"),
        Rating::new(2, 1, 5.0, "A"),
        Rating::new(2, 2, 4.0, "B"),
        Rating::new(2, 3, 5.0, "C"),
        Rating::new(3, 1, 1.0, "A"),
        Rating::new(3, 2, 1.0, "B"),
        Rating::new(3, 3, 5.0, "C"),
    ]))
    .unwrap()
}

/// 40 users over 30 movies with overlapping taste groups
fn synthetic_engine() -> RecommendationEngine {
    let mut ratings = Vec::new();
    for user in 1..=40u32 {
        let group = user % 3;
        for movie in 1..=30u32 {
            if (user + movie) % 4 == 0 {
                continue;
            }
            let liked = movie % 3 == group;
            let rating = if liked {
                4.0 + ((user + movie) % 3) as f64 * 0.5
            } else {
                1.0 + ((user * movie) % 5) as f64 * 0.5
            };
            ratings.push(Rating::new(user, movie, rating, format!("Movie {}", movie)));
        }
    }
    RecommendationEngine::load(RatingDataset::from_ratings(ratings)).unwrap()
}

#[test]
fn test_average_returns_only_unseen_movie() {
    let engine = small_engine();
    let list = engine.recommend(&request(1, Strategy::Average, 1)).unwrap();

    assert_eq!(list.score_kind, ScoreKind::Rating);
    let pairs: Vec<(&str, f64)> = list.pairs().collect();
    assert_eq!(pairs, vec![("C", 5.0)]);
}

#[test]
fn test_collaborative_unknown_user_is_empty() {
    let engine = small_engine();
    for min_ratings in [0, 1, 50] {
        let list = engine
            .recommend(&request(42, Strategy::Collaborative, min_ratings))
            .unwrap();
        assert!(list.is_empty());
        assert_eq!(list.score_kind, ScoreKind::Score);
    }
}

#[test]
fn test_collaborative_without_positive_neighbors_is_empty() {
    // User 2 is perfectly anti-correlated with user 1, user 3 is flat
    let engine = RecommendationEngine::load(RatingDataset::from_ratings(vec![
        Rating::new(1, 1, 5.0, "A"),
        Rating::new(1, 2, 1.0, "B"),
        Rating::new(2, 1, 1.0, "A"),
        Rating::new(2, 2, 5.0, "B"),
        Rating::new(3, 1, 3.0, "A"),
        Rating::new(3, 2, 3.0, "B"),
    ]))
    .unwrap();

    let list = engine
        .recommend(&request(1, Strategy::Collaborative, 1))
        .unwrap();
    assert!(list.is_empty());
}

#[test]
fn test_outputs_respect_watched_and_popularity() {
    let engine = synthetic_engine();
    let min_ratings = 25;

    for strategy in [Strategy::Average, Strategy::Collaborative] {
        for user in [1, 2, 3, 17, 40] {
            let list = engine.recommend(&request(user, strategy, min_ratings)).unwrap();
            let watched = engine.dataset().watched_movies(user);

            for item in &list.items {
                assert!(!watched.contains(&item.movie_id), "{} returned a watched movie", strategy);
                assert!(engine.popularity().count(item.movie_id) >= min_ratings);
            }
        }
    }
}

#[test]
fn test_collaborative_scores_bounded_and_sorted() {
    let engine = synthetic_engine();

    let mut non_empty = 0;
    for user in 1..=40 {
        let list = engine
            .recommend(&request(user, Strategy::Collaborative, 1))
            .unwrap();
        if !list.is_empty() {
            non_empty += 1;
        }
        assert!(list.len() <= 10);
        for item in &list.items {
            assert!(item.score >= 0.0 && item.score <= 5.0);
        }
        assert!(list.items.windows(2).all(|w| w[0].score >= w[1].score));
    }
    assert!(non_empty > 0);
}

#[test]
fn test_average_sorted_by_score_then_count() {
    let engine = synthetic_engine();
    let list = engine.recommend(&request(1, Strategy::Average, 1)).unwrap();

    for pair in list.items.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.score >= b.score);
        if a.score == b.score {
            assert!(engine.popularity().count(a.movie_id) >= engine.popularity().count(b.movie_id));
        }
    }
}

#[test]
fn test_recommend_is_idempotent() {
    let engine = synthetic_engine();
    for strategy in [Strategy::Average, Strategy::Collaborative] {
        let req = request(5, strategy, 10);
        let first = engine.recommend(&req).unwrap();
        let second = engine.recommend(&req).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_top_n_limits_output() {
    let engine = synthetic_engine();
    let req = RecommendRequest::new(2, Strategy::Average)
        .with_config(RecommendConfig::default().with_top_n(3).with_min_ratings(1));

    assert_eq!(engine.recommend(&req).unwrap().len(), 3);
}

#[test]
fn test_list_serializes_with_score_kind() {
    let engine = small_engine();
    let list = engine.recommend(&request(1, Strategy::Average, 1)).unwrap();

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["strategy"], "average");
    assert_eq!(json["score_kind"], "rating");
    assert_eq!(json["items"][0]["title"], "C");
    assert_eq!(json["items"][0]["score"], 5.0);
}

#[test]
fn test_handle_serves_concurrent_requests() {
    let handle = std::sync::Arc::new(EngineHandle::new(synthetic_engine()));

    let workers: Vec<_> = (1..=4u32)
        .map(|user| {
            let handle = handle.clone();
            std::thread::spawn(move || {
                handle
                    .recommend(&request(user, Strategy::Collaborative, 1))
                    .unwrap()
            })
        })
        .collect();

    for (user, worker) in (1..=4u32).zip(workers) {
        let threaded = worker.join().unwrap();
        let direct = handle
            .recommend(&request(user, Strategy::Collaborative, 1))
            .unwrap();
        assert_eq!(threaded, direct);
    }
}
