/// TMDB (The Movie Database) provider
///
/// Endpoints used:
/// 1. Title search: /search/movie?query=...
/// 2. Detail: /movie/{id} → genres of the selected movie
/// 3. Discovery: /discover/movie?with_genres=...&sort_by=vote_average.desc&vote_count.gte=50
///
/// The API key travels as the `api_key` query parameter on every request.
use std::future::Future;

use reqwest::{Client as HttpClient, Url};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Movie, MovieDetail, TmdbMovieDetails, TmdbPage},
    services::providers::{http_client, MovieMetadata},
};

const DISCOVER_SORT: &str = "vote_average.desc";
const DISCOVER_MIN_VOTES: &str = "50";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    /// Creates a TMDB client from the loaded configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            http_client: http_client(config.request_timeout())?,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
        })
    }

    /// Joins `segments` onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Config(format!("Invalid TMDB_API_URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("TMDB_API_URL cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetches a single discovery page
    async fn discover_page(&self, genres: &str, page: u32) -> AppResult<Vec<Movie>> {
        let url = self.endpoint(&["discover", "movie"])?;
        let page_param = page.to_string();

        tracing::debug!(genres = %genres, page, "Requesting TMDB discovery page");

        let response = self
            .http_client
            .get(url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("with_genres", genres),
                ("sort_by", DISCOVER_SORT),
                ("vote_count.gte", DISCOVER_MIN_VOTES),
                ("page", page_param.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::from_response("TMDB", response).await);
        }

        let body = response.text().await?;
        let page: TmdbPage = serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Failed to parse TMDB discovery page: {}", e)))?;

        Ok(page.results)
    }
}

/// Comma-joined genre ids, in the order given
pub fn genre_filter(genre_ids: &[u32]) -> String {
    genre_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Fetches pages `1..=page_count` in order, one at a time, and concatenates their results
///
/// The first failing page ends the walk; results from earlier pages are kept.
pub async fn accumulate_pages<F, Fut>(page_count: u32, mut fetch_page: F) -> Vec<Movie>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AppResult<Vec<Movie>>>,
{
    let mut movies = Vec::new();

    for page in 1..=page_count {
        match fetch_page(page).await {
            Ok(results) => movies.extend(results),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    page,
                    collected = movies.len(),
                    "Discovery page failed, keeping earlier pages"
                );
                break;
            }
        }
    }

    movies
}

#[async_trait::async_trait]
impl MovieMetadata for TmdbClient {
    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint(&["search", "movie"])?;

        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::from_response("TMDB", response).await);
        }

        let body = response.text().await?;
        let page: TmdbPage = serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Failed to parse TMDB search response: {}", e)))?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            provider = self.name(),
            "Title search completed"
        );

        Ok(page.results)
    }

    async fn get_detail(&self, movie_id: &str) -> AppResult<Option<MovieDetail>> {
        let movie_id = movie_id.trim();
        if movie_id.is_empty() {
            return Err(AppError::InvalidInput("Movie id cannot be empty".to_string()));
        }

        let url = self.endpoint(&["movie", movie_id])?;

        let response = match self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, movie_id = %movie_id, "TMDB detail request failed");
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            return Err(AppError::NotFound(format!(
                "TMDB has no movie with id {} (status {})",
                movie_id,
                response.status()
            )));
        }

        let body = response.text().await?;
        let details: TmdbMovieDetails = serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Failed to parse TMDB movie details: {}", e)))?;

        let detail = details.into_detail().ok_or_else(|| {
            AppError::NotFound(format!("TMDB movie {} has no genres", movie_id))
        })?;

        tracing::info!(
            movie_id = detail.id,
            genres = detail.genres.len(),
            provider = self.name(),
            "Movie detail fetched"
        );

        Ok(Some(detail))
    }

    async fn discover_by_genres(&self, genre_ids: &[u32], page_count: u32) -> Vec<Movie> {
        let genres = genre_filter(genre_ids);

        let movies = accumulate_pages(page_count, |page| self.discover_page(&genres, page)).await;

        tracing::info!(
            genres = %genres,
            page_count,
            results = movies.len(),
            provider = self.name(),
            "Discovery completed"
        );

        movies
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
