/// Gemini generative-text provider
///
/// Turns a free-text description into candidate movie titles with a single
/// `generateContent` call. The model is asked for a bare numbered list, which is
/// then parsed line by line. Any failure is logged and reported as "no suggestions".
use reqwest::{Client as HttpClient, Url};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{GenerateContentRequest, GenerateContentResponse},
    services::providers::{http_client, TitleSuggester},
};

/// Upper bound on titles returned per call
pub const MAX_SUGGESTIONS: usize = 5;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a Gemini client from the loaded configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            http_client: http_client(config.request_timeout())?,
            api_key: config.gemini_api_key.clone(),
            api_url: config.gemini_api_url.clone(),
            model: config.gemini_model.clone(),
        })
    }

    fn endpoint(&self) -> AppResult<Url> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        );
        Url::parse(&url).map_err(|e| AppError::Config(format!("Invalid GEMINI_API_URL: {}", e)))
    }

    /// Sends `prompt` and returns the completion text
    async fn complete(&self, prompt: String) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::from_response("Gemini", response).await);
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw Gemini API response");

        let completion: GenerateContentResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                AppError::Parse(format!("Failed to parse Gemini response: {}", e))
            })?;

        completion
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| AppError::Parse("Gemini response has no candidate text".to_string()))
    }
}

/// Prompt asking for a bare numbered list of titles matching `description`
pub fn build_prompt(description: &str) -> String {
    format!(
        "Based on the following description, suggest up to {max} movie titles that best match it.\n\
         Respond strictly with a numbered list, one title per line, in the form \"1. Title\".\n\
         Do not add years, explanations, headings or any other text.\n\n\
         Description: {description}",
        max = MAX_SUGGESTIONS,
        description = description.trim()
    )
}

/// Extracts titles from a numbered-list completion
///
/// Keeps lines starting with a digit, takes the text after the first `.`,
/// trims it and drops empties. At most `MAX_SUGGESTIONS` titles are returned.
pub fn parse_titles(completion: &str) -> Vec<String> {
    completion
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
        .filter_map(|line| line.split_once('.'))
        .map(|(_, title)| title.trim())
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[async_trait::async_trait]
impl TitleSuggester for GeminiClient {
    async fn suggest_titles(&self, description: &str) -> Vec<String> {
        match self.complete(build_prompt(description)).await {
            Ok(completion) => {
                let titles = parse_titles(&completion);
                tracing::info!(
                    suggestions = titles.len(),
                    provider = self.name(),
                    "Title suggestions received"
                );
                titles
            }
            Err(e) => {
                tracing::warn!(error = %e, provider = self.name(), "Title suggestion failed");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
