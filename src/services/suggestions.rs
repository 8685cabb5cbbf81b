use crate::services::providers::TitleSuggester;

/// Attempts made before the description flow gives up
pub const MAX_SUGGESTION_ATTEMPTS: u32 = 3;

/// Asks `suggester` for titles, retrying while the answer is empty
///
/// Returns the first non-empty list, or an empty list after `max_attempts` tries.
pub async fn suggest_with_retry(
    suggester: &dyn TitleSuggester,
    description: &str,
    max_attempts: u32,
) -> Vec<String> {
    let mut attempt = 0;

    while attempt < max_attempts {
        attempt += 1;
        let titles = suggester.suggest_titles(description).await;

        if !titles.is_empty() {
            tracing::debug!(attempt, suggestions = titles.len(), "Got title suggestions");
            return titles;
        }

        tracing::warn!(
            attempt,
            max_attempts,
            provider = suggester.name(),
            "No title suggestions, retrying"
        );
    }

    Vec::new()
}
