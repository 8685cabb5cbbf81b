use std::io::{BufRead, Write};

use crate::error::AppResult;

use super::{handlers, AppState, Console};

const MENU: &str = "\n========== Movie finder ==========\n\
                    1. Find a movie from a description\n\
                    2. Recommend movies similar to a title\n\
                    3. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Describe,
    Similar,
    Exit,
}

impl MenuOption {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuOption::Describe),
            "2" => Some(MenuOption::Similar),
            "3" => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

/// Runs the interactive menu until the user exits or input ends
///
/// Each flow handles its own failures, so only console errors end the loop early.
pub async fn run<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    loop {
        console.say(MENU)?;
        let Some(choice) = console.prompt("Choose an option (1-3):")? else {
            break;
        };

        match MenuOption::parse(&choice) {
            Some(MenuOption::Describe) => handlers::describe_and_search(state, console).await?,
            Some(MenuOption::Similar) => handlers::recommend_similar(state, console).await?,
            Some(MenuOption::Exit) => break,
            None => console.say(format!("\"{}\" is not an option.", choice.trim()))?,
        }
    }

    console.say("Goodbye!")?;
    Ok(())
}
