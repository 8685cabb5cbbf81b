use std::io::{BufRead, Write};

use crate::{
    error::{AppError, AppResult},
    services::{
        ranking::{self, MIN_VOTES},
        suggestions::{suggest_with_retry, MAX_SUGGESTION_ATTEMPTS},
    },
};

use super::{display, AppState, Console};

/// Rows shown from any result table
pub const DISPLAY_ROWS: usize = 5;

/// Discovery pages fetched for recommendations
pub const DISCOVERY_PAGES: u32 = 5;

/// Description flow: free text → suggested titles → pick one → TMDB search results
///
/// Only console failures are returned; everything else is reported to the user.
pub async fn describe_and_search<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let Some(description) = console.prompt("Describe the movie you are looking for:")? else {
        return Ok(());
    };
    if description.trim().is_empty() {
        return report(
            console,
            AppError::InvalidInput("The description cannot be empty".to_string()),
        );
    }

    let titles = suggest_with_retry(
        state.suggester.as_ref(),
        &description,
        MAX_SUGGESTION_ATTEMPTS,
    )
    .await;

    if titles.is_empty() {
        console.say(format!(
            "Could not get title suggestions after {} attempts. Please try again later.",
            MAX_SUGGESTION_ATTEMPTS
        ))?;
        return Ok(());
    }

    console.say("\n------------- Suggested titles -------------")?;
    console.say(display::numbered(&titles))?;

    let Some(answer) = console.prompt(&format!("\nPick a title (1-{}):", titles.len()))? else {
        return Ok(());
    };
    let index = match parse_selection(&answer, titles.len()) {
        Ok(index) => index,
        Err(e) => return report(console, e),
    };
    let title = &titles[index];

    match state.metadata.search_by_title(title).await {
        Ok(movies) if movies.is_empty() => {
            console.say(format!("No results found for \"{}\".", title))?;
        }
        Ok(movies) => {
            console.say(format!("\n------------- Results for \"{}\" -------------", title))?;
            console.say(display::movie_table(head(&movies), false))?;
        }
        Err(e) => report(console, e)?,
    }

    Ok(())
}

/// Similar-movies flow: title search → pick an id → genres → discovery → weighted ranking
///
/// Only console failures are returned; everything else is reported to the user.
pub async fn recommend_similar<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let Some(name) = console.prompt("Enter the name of a movie:")? else {
        return Ok(());
    };

    let movies = match state.metadata.search_by_title(&name).await {
        Ok(movies) => movies,
        Err(e) => return report(console, e),
    };
    if movies.is_empty() {
        console.say("No movies found with that name.")?;
        return Ok(());
    }

    console.say("\n------------- Search results -------------")?;
    console.say(display::movie_table(head(&movies), true))?;

    let Some(movie_id) = console.prompt("\nEnter the id of the movie to analyze:")? else {
        return Ok(());
    };

    let detail = match state.metadata.get_detail(&movie_id).await {
        Ok(Some(detail)) if !detail.genres.is_empty() => detail,
        Ok(_) => return invalid_id(console, &movie_id),
        Err(e) => {
            tracing::debug!(error = %e, movie_id = %movie_id, "Detail lookup failed");
            return invalid_id(console, &movie_id);
        }
    };

    console.say("\n------------- Genres of the selected movie -------------")?;
    console.say(detail.genre_names().join(", "))?;

    let candidates = state
        .metadata
        .discover_by_genres(&detail.genre_ids(), DISCOVERY_PAGES)
        .await;
    if candidates.is_empty() {
        console.say("No recommendations found for the genres of this movie.")?;
        return Ok(());
    }

    let ranked = match ranking::rank(&candidates, MIN_VOTES) {
        Ok(ranked) => ranked,
        Err(e) => return report(console, e),
    };

    console.say("\n------------- Recommended movies (weighted rating) -------------")?;
    console.say(display::ranked_table(head(&ranked)))?;

    Ok(())
}

/// Parses a 1-based choice among `count` items into a 0-based index
pub fn parse_selection(answer: &str, count: usize) -> AppResult<usize> {
    let choice: usize = answer.trim().parse().map_err(|_| {
        AppError::InvalidInput(format!("\"{}\" is not a number", answer.trim()))
    })?;

    if choice == 0 || choice > count {
        return Err(AppError::InvalidInput(format!(
            "{} is out of range, expected 1 to {}",
            choice, count
        )));
    }

    Ok(choice - 1)
}

fn head<T>(items: &[T]) -> &[T] {
    &items[..items.len().min(DISPLAY_ROWS)]
}

fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, error: AppError) -> AppResult<()> {
    tracing::debug!(error = %error, "Flow aborted");
    console.say(format!("Error: {}", error))?;
    Ok(())
}

fn invalid_id<R: BufRead, W: Write>(console: &mut Console<R, W>, movie_id: &str) -> AppResult<()> {
    console.say(format!(
        "The movie id \"{}\" is not valid. Please try again.",
        movie_id.trim()
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, Movie, MovieDetail};
    use crate::services::providers::{MockMovieMetadata, MockTitleSuggester};
    use std::sync::Arc;

    fn movie(id: u64, title: &str, vote_average: f64, vote_count: u64) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            release_date: Some("2001-01-01".to_string()),
            vote_average,
            vote_count,
            popularity: 10.0,
            genre_ids: vec![18],
        }
    }

    fn state(metadata: MockMovieMetadata, suggester: MockTitleSuggester) -> AppState {
        AppState::new(Arc::new(metadata), Arc::new(suggester))
    }

    fn suggester() -> MockTitleSuggester {
        let mut suggester = MockTitleSuggester::new();
        suggester.expect_name().return_const("mock");
        suggester
    }

    async fn run_describe(state: &AppState, input: &str) -> String {
        let mut console = Console::new(input.as_bytes(), Vec::new());
        describe_and_search(state, &mut console).await.unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    async fn run_similar(state: &AppState, input: &str) -> String {
        let mut console = Console::new(input.as_bytes(), Vec::new());
        recommend_similar(state, &mut console).await.unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1", 3).unwrap(), 0);
        assert_eq!(parse_selection(" 3 ", 3).unwrap(), 2);
        assert!(matches!(parse_selection("0", 3), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_selection("4", 3), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_selection("two", 3), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_selection("-1", 3), Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_describe_gives_up_after_three_empty_attempts() {
        let mut suggester = suggester();
        suggester
            .expect_suggest_titles()
            .times(3)
            .returning(|_| Vec::new());
        let mut metadata = MockMovieMetadata::new();
        metadata.expect_search_by_title().never();

        let output = run_describe(&state(metadata, suggester), "a shark movie\n").await;

        assert!(output.contains("Could not get title suggestions after 3 attempts"));
    }

    #[tokio::test]
    async fn test_describe_searches_selected_title() {
        let mut suggester = suggester();
        suggester
            .expect_suggest_titles()
            .times(1)
            .returning(|_| vec!["Jaws".to_string(), "Alien".to_string()]);
        let mut metadata = MockMovieMetadata::new();
        metadata
            .expect_search_by_title()
            .withf(|query| query.contains("Alien"))
            .times(1)
            .returning(|_| {
                Ok((1..=8)
                    .map(|id| movie(id, &format!("Alien {}", id), 7.0, 100))
                    .collect())
            });

        let output = run_describe(&state(metadata, suggester), "space horror\n2\n").await;

        assert!(output.contains("  1. Jaws"));
        assert!(output.contains("  2. Alien"));
        assert!(output.contains("Alien 5"));
        assert!(!output.contains("Alien 6"));
        assert!(!output.contains("genre_ids"));
    }

    #[tokio::test]
    async fn test_describe_rejects_out_of_range_choice() {
        let mut suggester = suggester();
        suggester
            .expect_suggest_titles()
            .returning(|_| vec!["Jaws".to_string()]);
        let mut metadata = MockMovieMetadata::new();
        metadata.expect_search_by_title().never();

        let output = run_describe(&state(metadata, suggester), "shark\n7\n").await;

        assert!(output.contains("Error: Invalid input: 7 is out of range"));
    }

    #[tokio::test]
    async fn test_describe_rejects_non_numeric_choice() {
        let mut suggester = suggester();
        suggester
            .expect_suggest_titles()
            .returning(|_| vec!["Jaws".to_string()]);
        let mut metadata = MockMovieMetadata::new();
        metadata.expect_search_by_title().never();

        let output = run_describe(&state(metadata, suggester), "shark\nfirst\n").await;

        assert!(output.contains("is not a number"));
    }

    #[tokio::test]
    async fn test_describe_reports_search_failure() {
        let mut suggester = suggester();
        suggester
            .expect_suggest_titles()
            .returning(|_| vec!["Jaws".to_string()]);
        let mut metadata = MockMovieMetadata::new();
        metadata
            .expect_search_by_title()
            .returning(|_| Err(AppError::Api("TMDB returned status 401".to_string())));

        let output = run_describe(&state(metadata, suggester), "shark\n1\n").await;

        assert!(output.contains("Error: External API error: TMDB returned status 401"));
    }

    #[tokio::test]
    async fn test_describe_blank_description() {
        let mut suggester = suggester();
        suggester.expect_suggest_titles().never();

        let output = run_describe(&state(MockMovieMetadata::new(), suggester), "   \n").await;

        assert!(output.contains("The description cannot be empty"));
    }

    #[tokio::test]
    async fn test_similar_ranks_discovered_movies() {
        let mut metadata = MockMovieMetadata::new();
        metadata
            .expect_search_by_title()
            .returning(|_| Ok(vec![movie(578, "Jaws", 7.7, 10000)]));
        metadata
            .expect_get_detail()
            .withf(|id| id.contains("578"))
            .returning(|_| {
                Ok(Some(MovieDetail {
                    id: 578,
                    title: "Jaws".to_string(),
                    genres: vec![
                        Genre {
                            id: 27,
                            name: "Horror".to_string(),
                        },
                        Genre {
                            id: 53,
                            name: "Thriller".to_string(),
                        },
                    ],
                }))
            });
        metadata
            .expect_discover_by_genres()
            .withf(|genres, pages| genres.to_vec() == vec![27, 53] && *pages == DISCOVERY_PAGES)
            .times(1)
            .returning(|_, _| {
                vec![
                    movie(1, "Obscure Gem", 9.5, 3),
                    movie(2, "Classic", 8.4, 9000),
                    movie(3, "Decent", 7.0, 800),
                ]
            });

        let output = run_similar(&state(metadata, suggester()), "Jaws\n578\n").await;

        assert!(output.contains("Horror, Thriller"));
        assert!(output.contains("weighted_rating"));
        let classic = output.find("Classic").unwrap();
        let gem = output.find("Obscure Gem").unwrap();
        assert!(classic < gem);
    }

    #[tokio::test]
    async fn test_similar_no_search_results() {
        let mut metadata = MockMovieMetadata::new();
        metadata.expect_search_by_title().returning(|_| Ok(vec![]));
        metadata.expect_get_detail().never();

        let output = run_similar(&state(metadata, suggester()), "zzzz\n").await;

        assert!(output.contains("No movies found with that name."));
    }

    #[tokio::test]
    async fn test_similar_invalid_id() {
        let mut metadata = MockMovieMetadata::new();
        metadata
            .expect_search_by_title()
            .returning(|_| Ok(vec![movie(578, "Jaws", 7.7, 10000)]));
        metadata
            .expect_get_detail()
            .returning(|_| Err(AppError::NotFound("no movie".to_string())));
        metadata.expect_discover_by_genres().never();

        let output = run_similar(&state(metadata, suggester()), "Jaws\n999999\n").await;

        assert!(output.contains("The movie id \"999999\" is not valid"));
    }

    #[tokio::test]
    async fn test_similar_unreachable_detail_is_invalid_id() {
        let mut metadata = MockMovieMetadata::new();
        metadata
            .expect_search_by_title()
            .returning(|_| Ok(vec![movie(578, "Jaws", 7.7, 10000)]));
        metadata.expect_get_detail().returning(|_| Ok(None));
        metadata.expect_discover_by_genres().never();

        let output = run_similar(&state(metadata, suggester()), "Jaws\n578\n").await;

        assert!(output.contains("is not valid"));
    }

    #[tokio::test]
    async fn test_similar_accepts_id_outside_results() {
        let mut metadata = MockMovieMetadata::new();
        metadata
            .expect_search_by_title()
            .returning(|_| Ok(vec![movie(578, "Jaws", 7.7, 10000)]));
        metadata
            .expect_get_detail()
            .withf(|id| id.contains("348"))
            .times(1)
            .returning(|_| {
                Ok(Some(MovieDetail {
                    id: 348,
                    title: "Alien".to_string(),
                    genres: vec![Genre {
                        id: 878,
                        name: "Science Fiction".to_string(),
                    }],
                }))
            });
        metadata
            .expect_discover_by_genres()
            .returning(|_, _| Vec::new());

        let output = run_similar(&state(metadata, suggester()), "Jaws\n348\n").await;

        assert!(output.contains("Science Fiction"));
        assert!(output.contains("No recommendations found"));
    }
}
