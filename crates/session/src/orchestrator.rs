//! # Session Orchestrator
//!
//! This module runs the user actions of one session:
//! 1. Load the movies and ratings files
//! 2. List movies by genre
//! 3. Recommend movies similar to a title
//! 4. List every genre
//!
//! The loaded tables are the only state kept between actions. Everything
//! derived from them (feature table, neighbor index) is rebuilt inside
//! the action that needs it. Every outcome, including failures the user
//! has to act on, ends up in the returned `Report`; only infrastructure
//! failures (a panicked worker task) surface as `Err`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use data_loader::{Dataset, parser};
use pipeline::{
    DEFAULT_NEIGHBORS, GenreSearch, MatchOutcome, Recommender, TitleSearch, list_genres,
    movies_by_genre,
};

use crate::report::{Report, movie_line};

/// A user action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the session's tables with the given files
    Load { movies: PathBuf, ratings: PathBuf },
    ByGenre { genre: String },
    /// `neighbors` overrides the configured neighbor count
    Similar { title: String, neighbors: Option<usize> },
    ListGenres,
}

/// Tunables for the similar-movies action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Neighbors fetched per matched movie (the movie itself included)
    pub neighbors: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
        }
    }
}

/// Holds the loaded tables of one session and dispatches actions
#[derive(Debug, Clone, Default)]
pub struct SessionOrchestrator {
    dataset: Option<Arc<Dataset>>,
    config: RecommenderConfig,
}

impl SessionOrchestrator {
    /// Create a session with no data loaded
    pub fn new(config: RecommenderConfig) -> Self {
        Self {
            dataset: None,
            config,
        }
    }

    /// Create a session around tables that are already in memory
    pub fn with_dataset(dataset: Dataset, config: RecommenderConfig) -> Self {
        Self {
            dataset: Some(Arc::new(dataset)),
            config,
        }
    }

    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn config(&self) -> RecommenderConfig {
        self.config
    }

    /// Run one action to completion
    pub async fn handle(&mut self, action: Action) -> Result<Report> {
        let start_time = Instant::now();
        let label = action_label(&action);

        let report = match action {
            Action::Load { movies, ratings } => self.load(movies, ratings).await?,
            Action::ByGenre { genre } => self.by_genre(genre).await?,
            Action::Similar { title, neighbors } => {
                let neighbors = neighbors.unwrap_or(self.config.neighbors);
                self.similar(title, neighbors).await?
            }
            Action::ListGenres => self.list_genres(),
        };

        info!(
            "Action {} finished in {:.2?} ({} notices)",
            label,
            start_time.elapsed(),
            report.notices.len()
        );
        Ok(report)
    }

    /// Parse both files on blocking tasks and report each one.
    ///
    /// The previous tables are dropped first, so a failed load leaves the
    /// session without data until a good pair of files is supplied.
    async fn load(&mut self, movies_path: PathBuf, ratings_path: PathBuf) -> Result<Report> {
        self.dataset = None;
        let mut report = Report::new();

        let (movies_result, ratings_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let path = movies_path.clone();
                move || parser::parse_movies(&path)
            }),
            tokio::task::spawn_blocking({
                let path = ratings_path.clone();
                move || parser::parse_ratings(&path)
            })
        );
        let movies_result = movies_result.context("Movies loader task panicked")?;
        let ratings_result = ratings_result.context("Ratings loader task panicked")?;

        let movies = match movies_result {
            Ok(movies) => {
                report.success(format!(
                    "Loaded {} movies from {}",
                    movies.len(),
                    movies_path.display()
                ));
                Some(movies)
            }
            Err(err) => {
                warn!("Failed to load {}: {}", movies_path.display(), err);
                report.error(format!(
                    "Error loading movies from {}: {}",
                    movies_path.display(),
                    err
                ));
                None
            }
        };

        let ratings = match ratings_result {
            Ok(ratings) => {
                report.success(format!(
                    "Loaded {} ratings from {}",
                    ratings.len(),
                    ratings_path.display()
                ));
                Some(ratings)
            }
            Err(err) => {
                warn!("Failed to load {}: {}", ratings_path.display(), err);
                report.error(format!(
                    "Error loading ratings from {}: {}",
                    ratings_path.display(),
                    err
                ));
                None
            }
        };

        let (Some(movies), Some(ratings)) = (movies, ratings) else {
            return Ok(report);
        };

        match Dataset::from_parts(movies, ratings) {
            Ok(dataset) => self.dataset = Some(Arc::new(dataset)),
            Err(err) => {
                warn!("Rejected loaded tables: {}", err);
                report.error(format!("Loaded data is inconsistent: {}", err));
            }
        }
        Ok(report)
    }

    async fn by_genre(&self, genre: String) -> Result<Report> {
        let mut report = Report::new();
        let Some(dataset) = self.require_data(&mut report) else {
            return Ok(report);
        };
        if genre.trim().is_empty() {
            report.warning("Please enter a genre.");
            return Ok(report);
        }

        let query = genre.clone();
        let result = tokio::task::spawn_blocking(move || {
            movies_by_genre(dataset.movies(), &query).map(|search| match search {
                GenreSearch::NotFound => None,
                GenreSearch::Found(movies) => Some(
                    movies
                        .iter()
                        .map(|m| movie_line(&m.title, &m.genres))
                        .collect::<Vec<_>>(),
                ),
            })
        })
        .await
        .context("Genre search task panicked")?;

        match result {
            Ok(None) => report.warning(format!("No movies found for genre: {}", genre)),
            Ok(Some(lines)) => {
                report.heading(format!("Movies for genre '{}':", genre));
                for line in lines {
                    report.line(line);
                }
            }
            Err(err) => report.error(format!("Genre search failed: {}", err)),
        }
        Ok(report)
    }

    async fn similar(&self, title: String, neighbors: usize) -> Result<Report> {
        let mut report = Report::new();
        let Some(dataset) = self.require_data(&mut report) else {
            return Ok(report);
        };
        if title.trim().is_empty() {
            report.warning("Please enter a movie title.");
            return Ok(report);
        }

        let recommender = Recommender::new(neighbors);
        let result = tokio::task::spawn_blocking(move || {
            recommender.similar_to_title(dataset.movies(), dataset.ratings(), &title)
        })
        .await
        .context("Recommendation task panicked")?;

        let matches = match result {
            Ok(TitleSearch::Found(matches)) => matches,
            Ok(TitleSearch::NotFound) => {
                report.warning("Movie not found. Try again.");
                return Ok(report);
            }
            Err(err) => {
                report.error(format!("Could not prepare data for recommendations: {}", err));
                return Ok(report);
            }
        };

        for matched in matches {
            match matched.outcome {
                MatchOutcome::Recommended { recommendations } => {
                    report.heading(format!("Recommended movies for '{}':", matched.title));
                    for rec in recommendations {
                        report.line(movie_line(&rec.title, &rec.genres));
                    }
                }
                MatchOutcome::MissingFeatures => report.warning(format!(
                    "Movie with id {} not found in prepared data.",
                    matched.movie_id
                )),
                MatchOutcome::Failed { reason } => report.error(format!(
                    "An error occurred for '{}': {}",
                    matched.title, reason
                )),
            }
        }
        Ok(report)
    }

    fn list_genres(&self) -> Report {
        let mut report = Report::new();
        let Some(dataset) = self.require_data(&mut report) else {
            return report;
        };

        report.heading("Available genres:");
        for genre in list_genres(dataset.movies()) {
            report.line(format!("- {}", genre));
        }
        report
    }

    fn require_data(&self, report: &mut Report) -> Option<Arc<Dataset>> {
        match &self.dataset {
            Some(dataset) => Some(dataset.clone()),
            None => {
                report.error("Data not loaded. Supply the movies and ratings files first.");
                None
            }
        }
    }
}

fn action_label(action: &Action) -> &'static str {
    match action {
        Action::Load { .. } => "load",
        Action::ByGenre { .. } => "by-genre",
        Action::Similar { .. } => "similar",
        Action::ListGenres => "genres",
    }
}
