/// External data providers
///
/// The CLI talks to two services: a movie metadata API (TMDB) and a generative-text
/// API (Gemini). Each sits behind a trait so the flows can run against fakes in tests.
use crate::{
    error::AppResult,
    models::{Movie, MovieDetail},
};

pub mod gemini;
pub mod tmdb;

/// Movie metadata lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieMetadata: Send + Sync {
    /// Search movies by title
    ///
    /// Returns an empty list when the API reports no results.
    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Fetch a movie's detail, including its genres
    ///
    /// `Err(NotFound)` when the API rejects the id or the body has no genres.
    /// `Ok(None)` when the request never reached the API.
    async fn get_detail(&self, movie_id: &str) -> AppResult<Option<MovieDetail>>;

    /// Discover movies sharing `genre_ids` across pages `1..=page_count`
    ///
    /// Stops at the first failing page and returns what was collected before it.
    async fn discover_by_genres(&self, genre_ids: &[u32], page_count: u32) -> Vec<Movie>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Free-text description to candidate movie titles
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TitleSuggester: Send + Sync {
    /// Up to five candidate titles, best guess first
    ///
    /// Any failure degrades to an empty list.
    async fn suggest_titles(&self, description: &str) -> Vec<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the shared HTTP client with the configured timeout
pub(crate) fn http_client(timeout: std::time::Duration) -> AppResult<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
