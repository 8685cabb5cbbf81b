use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::providers::{gemini::GeminiClient, tmdb::TmdbClient, MovieMetadata, TitleSuggester},
};

/// Providers shared by every flow
///
/// Built once at startup; nothing here changes while the menu runs.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MovieMetadata>,
    pub suggester: Arc<dyn TitleSuggester>,
}

impl AppState {
    pub fn new(metadata: Arc<dyn MovieMetadata>, suggester: Arc<dyn TitleSuggester>) -> Self {
        Self {
            metadata,
            suggester,
        }
    }

    /// Wires the TMDB and Gemini clients from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let metadata = TmdbClient::new(config)?;
        let suggester = GeminiClient::new(config)?;

        tracing::info!(
            metadata = metadata.name(),
            suggester = suggester.name(),
            "Providers initialized"
        );

        Ok(Self::new(Arc::new(metadata), Arc::new(suggester)))
    }
}
