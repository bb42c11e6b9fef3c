//! Interactive session: one command per line, each run to completion
//! before the next line is read.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use session::{Action, SessionOrchestrator};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::render::{OutputFormat, render};

const HELP: &str = "\
Commands:
  load <movies.csv> <ratings.csv>   load a new pair of files
  genre <text>                      movies whose genres contain <text>
  similar <title>                   movies similar to each title containing <title>
  genres                            list every genre
  help                              show this help
  quit                              leave the session";

#[derive(Debug, PartialEq)]
pub enum SessionCommand {
    Run(Action),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parse one input line. Paths given to `load` cannot contain spaces.
pub fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Empty;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "quit" | "exit" => SessionCommand::Quit,
        "help" => SessionCommand::Help,
        "genres" => SessionCommand::Run(Action::ListGenres),
        "genre" => SessionCommand::Run(Action::ByGenre {
            genre: rest.to_string(),
        }),
        "similar" => SessionCommand::Run(Action::Similar {
            title: rest.to_string(),
            neighbors: None,
        }),
        "load" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [movies, ratings] => SessionCommand::Run(Action::Load {
                movies: PathBuf::from(movies),
                ratings: PathBuf::from(ratings),
            }),
            _ => SessionCommand::Invalid("usage: load <movies.csv> <ratings.csv>".to_string()),
        },
        other => SessionCommand::Invalid(format!("unknown command '{}'; type 'help'", other)),
    }
}

/// Run the session until `quit` or end of input
pub async fn run(
    session: &mut SessionOrchestrator,
    initial_load: Action,
    format: OutputFormat,
) -> Result<()> {
    info!("Starting interactive session");

    let report = session.handle(initial_load).await?;
    render(&report, format)?;
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            break;
        };

        match parse_command(&line) {
            SessionCommand::Run(action) => {
                debug!("Running {:?}", action);
                let report = session.handle(action).await?;
                render(&report, format)?;
            }
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Invalid(message) => println!("{} {}", "!".yellow(), message.yellow()),
        }
    }

    info!("Interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_similar_keeps_full_title() {
        assert_eq!(
            parse_command("similar  Toy Story 2 "),
            SessionCommand::Run(Action::Similar {
                title: "Toy Story 2".to_string(),
                neighbors: None,
            })
        );
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(
            parse_command("load a.csv b.csv"),
            SessionCommand::Run(Action::Load {
                movies: PathBuf::from("a.csv"),
                ratings: PathBuf::from("b.csv"),
            })
        );
        assert!(matches!(parse_command("load a.csv"), SessionCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("   "), SessionCommand::Empty);
        assert_eq!(parse_command("GENRES"), SessionCommand::Run(Action::ListGenres));
        assert_eq!(
            parse_command("genre"),
            SessionCommand::Run(Action::ByGenre {
                genre: String::new()
            })
        );
        assert_eq!(parse_command("exit"), SessionCommand::Quit);
        assert!(matches!(parse_command("dance"), SessionCommand::Invalid(_)));
    }
}
