/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    Api(String),

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Builds an `Api` error from a non-2xx response, consuming its body
    pub async fn from_response(service: &str, response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        AppError::Api(format!("{} returned status {}: {}", service, status, body))
    }
}

pub type AppResult<T> = Result<T, AppError>;
