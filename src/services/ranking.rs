//! Bayesian weighted-rating ranking.
//!
//! Movies with few votes are pulled toward the mean rating of the whole
//! candidate pool; movies with many votes keep close to their own average.

use crate::{
    error::{AppError, AppResult},
    models::{Movie, RankedMovie},
};

/// Minimum vote count a movie needs before its own average dominates
pub const MIN_VOTES: u64 = 50;

/// Ranks `movies` by weighted rating, highest first.
///
/// `weighted = v / (v + m) * R + m / (v + m) * C` where `C` is the mean
/// `vote_average` of the input. Ties keep their input order.
///
/// Fails with `EmptyInput` when `movies` is empty, since `C` is undefined.
pub fn rank(movies: &[Movie], min_votes: u64) -> AppResult<Vec<RankedMovie>> {
    let mean = mean_vote_average(movies)?;

    let mut ranked: Vec<RankedMovie> = movies
        .iter()
        .map(|movie| RankedMovie {
            movie: movie.clone(),
            weighted_rating: weighted_rating(movie, min_votes, mean),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.weighted_rating.total_cmp(&a.weighted_rating));

    tracing::debug!(
        candidates = ranked.len(),
        mean_vote_average = mean,
        min_votes,
        "Ranked candidates by weighted rating"
    );

    Ok(ranked)
}

fn mean_vote_average(movies: &[Movie]) -> AppResult<f64> {
    if movies.is_empty() {
        return Err(AppError::EmptyInput(
            "Cannot rank an empty set of movies".to_string(),
        ));
    }
    let total: f64 = movies.iter().map(|m| m.vote_average).sum();
    Ok(total / movies.len() as f64)
}

fn weighted_rating(movie: &Movie, min_votes: u64, mean: f64) -> f64 {
    let votes = movie.vote_count as f64;
    let m = min_votes as f64;
    let denominator = votes + m;

    // Only reachable with min_votes == 0 and no votes: nothing to weigh, fall back to the mean
    if denominator == 0.0 {
        return mean;
    }

    (votes / denominator) * movie.vote_average + (m / denominator) * mean
}
