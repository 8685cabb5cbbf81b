//! Fixed-width text tables for search results and recommendations.

use crate::models::{Movie, RankedMovie};

const TITLE_WIDTH: usize = 40;

/// Table of search results: id, title, release date, votes and popularity
///
/// `with_genres` appends the raw genre id list as a last column.
pub fn movie_table(movies: &[Movie], with_genres: bool) -> String {
    let mut header = format!(
        "{:>8}  {:<title$}  {:<12}  {:>12}  {:>10}  {:>10}",
        "id",
        "title",
        "release_date",
        "vote_average",
        "vote_count",
        "popularity",
        title = TITLE_WIDTH
    );
    if with_genres {
        header.push_str("  genre_ids");
    }

    let mut lines = vec![header];
    for movie in movies {
        let mut line = format!(
            "{:>8}  {:<title$}  {:<12}  {:>12.1}  {:>10}  {:>10.3}",
            movie.id,
            fit(&movie.title),
            movie.release_date.as_deref().unwrap_or(""),
            movie.vote_average,
            movie.vote_count,
            movie.popularity,
            title = TITLE_WIDTH
        );
        if with_genres {
            line.push_str(&format!("  {:?}", movie.genre_ids));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Table of ranked recommendations: title, votes and weighted rating
pub fn ranked_table(ranked: &[RankedMovie]) -> String {
    let mut lines = vec![format!(
        "{:<title$}  {:>12}  {:>10}  {:>15}",
        "title",
        "vote_average",
        "vote_count",
        "weighted_rating",
        title = TITLE_WIDTH
    )];

    lines.extend(ranked.iter().map(|r| {
        format!(
            "{:<title$}  {:>12.1}  {:>10}  {:>15.4}",
            fit(&r.movie.title),
            r.movie.vote_average,
            r.movie.vote_count,
            r.weighted_rating,
            title = TITLE_WIDTH
        )
    }));

    lines.join("\n")
}

/// Numbered list, starting at 1
pub fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

// Shortens long titles so columns stay aligned
fn fit(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_string();
    }
    let mut short: String = title.chars().take(TITLE_WIDTH - 3).collect();
    short.push_str("...");
    short
}
