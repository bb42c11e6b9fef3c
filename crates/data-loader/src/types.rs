//! Core domain types for the movies and ratings tables.
//!
//! - `Movie` keeps its genre list exactly as it appeared in the file
//!   (pipe-delimited) so it can be displayed verbatim.
//! - `Dataset` owns both tables for the lifetime of one session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DataLoadError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (the `movieId` column)
pub type MovieId = u32;

/// Separator between genre labels in the `genres` column
pub const GENRE_SEPARATOR: char = '|';

// =============================================================================
// Movie
// =============================================================================

/// Represents a movie in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Pipe-separated genre labels, e.g. "Animation|Children|Comedy"
    pub genres: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.into(),
        }
    }

    /// Distinct, non-empty genre labels in the order they first appear.
    ///
    /// Labels are not trimmed: "Action| Comedy" yields "Action" and " Comedy".
    pub fn genre_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for label in self.genres.split(GENRE_SEPARATOR) {
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}

// =============================================================================
// Rating
// =============================================================================

/// A single rating received by a movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub movie_id: MovieId,
    /// Rating value on whatever scale the file uses
    pub rating: f64,
}

impl Rating {
    pub fn new(movie_id: MovieId, rating: f64) -> Self {
        Self { movie_id, rating }
    }
}

// =============================================================================
// Dataset - the loaded tables
// =============================================================================

/// Both tables as loaded from one pair of files.
///
/// Movies keep file order; `movie_positions` maps an id to its position.
#[derive(Debug, Default)]
pub struct Dataset {
    pub(crate) movies: Vec<Movie>,
    pub(crate) movie_positions: HashMap<MovieId, usize>,
    pub(crate) ratings: Vec<Rating>,
}

impl Dataset {
    /// Creates a new, empty Dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// All movies, in the order they were loaded
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All ratings, in the order they were loaded
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Append a movie, rejecting an identifier that is already present
    pub fn insert_movie(&mut self, movie: Movie) -> Result<()> {
        if self.movie_positions.contains_key(&movie.id) {
            return Err(DataLoadError::DuplicateMovie { id: movie.id });
        }
        self.movie_positions.insert(movie.id, self.movies.len());
        self.movies.push(movie);
        Ok(())
    }

    /// Append a rating
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// (movies, ratings) counts
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}
