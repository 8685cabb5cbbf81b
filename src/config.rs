use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Environment variables that must be present for the CLI to start
pub const REQUIRED_VARS: [&str; 2] = ["TMDB_API_KEY", "GEMINI_API_KEY"];

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// Gemini API key
    pub gemini_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for title suggestions
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Timeout applied to every outbound request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::checked(envy::from_env::<Config>())
    }

    /// Load configuration from explicit `(NAME, value)` pairs
    pub fn from_iter<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::checked(envy::from_iter::<_, Config>(vars))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn checked(parsed: Result<Config, envy::Error>) -> AppResult<Self> {
        let config = parsed.map_err(|e| missing_config(&e.to_string()))?;

        if config.tmdb_api_key.trim().is_empty() {
            return Err(missing_config("TMDB_API_KEY is empty"));
        }
        if config.gemini_api_key.trim().is_empty() {
            return Err(missing_config("GEMINI_API_KEY is empty"));
        }

        Ok(config)
    }
}

fn missing_config(detail: &str) -> AppError {
    AppError::Config(format!(
        "{}. Set {} in the environment or in a .env file",
        detail,
        REQUIRED_VARS.join(" and ")
    ))
}
