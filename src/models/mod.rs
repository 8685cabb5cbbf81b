use serde::{Deserialize, Serialize};

/// A movie as returned by TMDB search and discovery endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// TMDB sends `null`, `""` or omits the field for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Detail view of a single movie, fetched by id
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    /// Genres in the order TMDB lists them
    pub genres: Vec<Genre>,
}

impl MovieDetail {
    pub fn genre_ids(&self) -> Vec<u32> {
        self.genres.iter().map(|g| g.id).collect()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

/// A movie paired with its Bayesian weighted rating
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMovie {
    pub movie: Movie,
    pub weighted_rating: f64,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged result envelope shared by `/search/movie` and `/discover/movie`
#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<Movie>,
}

/// Raw API response from GET /movie/{id}
#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Absent when the id does not resolve to a real movie
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
}

impl TmdbMovieDetails {
    /// Converts into a `MovieDetail`, or `None` when the response carries no genres field
    pub fn into_detail(self) -> Option<MovieDetail> {
        let genres = self.genres?;
        Some(MovieDetail {
            id: self.id,
            title: self.title,
            genres,
        })
    }
}

// ============================================================================
// Gemini API Types
// ============================================================================

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text at `candidates[0].content.parts[0].text`; `None` if any step is missing
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}
