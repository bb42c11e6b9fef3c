use anyhow::Result;
use clap::{Parser, Subcommand};
use session::{Action, DEFAULT_NEIGHBORS, RecommenderConfig, Report, SessionOrchestrator};
use std::path::PathBuf;

mod render;
mod repl;

use render::{OutputFormat, render};

/// ReelMatch - Movie Recommender
#[derive(Parser)]
#[command(name = "reel-match")]
#[command(about = "Find movies by genre or similar to a title you like", long_about = None)]
struct Cli {
    /// Path to the movies CSV (movieId,title,genres)
    #[arg(short, long, default_value = "data/movies.csv")]
    movies: PathBuf,

    /// Path to the ratings CSV (movieId,rating)
    #[arg(short, long, default_value = "data/ratings.csv")]
    ratings: PathBuf,

    /// Neighbors fetched per matched movie; the movie itself takes one
    #[arg(short = 'k', long, default_value_t = DEFAULT_NEIGHBORS)]
    neighbors: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every genre found in the movies file
    Genres,

    /// List movies whose genres contain a text
    ByGenre {
        /// Genre to look for (case-insensitive substring match)
        #[arg(long)]
        genre: String,
    },

    /// Recommend movies similar to each title containing a text
    Similar {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Start an interactive session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = RecommenderConfig {
        neighbors: cli.neighbors,
    };
    let mut session = SessionOrchestrator::new(config);
    let load = Action::Load {
        movies: cli.movies,
        ratings: cli.ratings,
    };

    // Dispatch to appropriate command handler
    let action = match cli.command {
        Commands::Interactive => return repl::run(&mut session, load, cli.format).await,
        Commands::Genres => Action::ListGenres,
        Commands::ByGenre { genre } => Action::ByGenre { genre },
        Commands::Similar { title } => Action::Similar {
            title,
            neighbors: None,
        },
    };

    let report = run_once(&mut session, load, action).await?;
    render(&report, cli.format)?;

    Ok(())
}

/// Load the files, then run `action` if the load succeeded. Both outcomes
/// go into one report so `--format json` prints a single document.
async fn run_once(session: &mut SessionOrchestrator, load: Action, action: Action) -> Result<Report> {
    let mut report = session.handle(load).await?;
    if session.has_data() {
        report.append(session.handle(action).await?);
    }
    Ok(report)
}
