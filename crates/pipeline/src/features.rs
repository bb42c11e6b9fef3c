//! Feature building for the similar-movies lookup.
//!
//! Every movie becomes one numeric row:
//! `[mean rating, genre flag 1, genre flag 2, ...]`
//! with one flag per distinct genre label across the whole movies table.
//! The table is rebuilt on every lookup and dropped afterwards.

use data_loader::{Movie, MovieId, Rating};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::error::{RecommendError, Result};

/// Feature vector of a single movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub movie_id: MovieId,
    /// Mean rating followed by the genre flags
    pub values: Vec<f64>,
}

impl FeatureRow {
    /// Mean rating, 0.0 for a movie without ratings
    pub fn mean_rating(&self) -> f64 {
        self.values[0]
    }

    /// 0.0 / 1.0 flags in `FeatureTable::genre_columns` order
    pub fn genre_flags(&self) -> &[f64] {
        &self.values[1..]
    }
}

/// One row per movie, all rows sharing the same column layout.
///
/// Rows are in the order of the movies slice the table was built from.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    genre_columns: Vec<String>,
    rows: Vec<FeatureRow>,
    positions: HashMap<MovieId, usize>,
}

impl FeatureTable {
    /// Genre labels, sorted lexicographically
    pub fn genre_columns(&self) -> &[String] {
        &self.genre_columns
    }

    /// Number of values in every row
    pub fn width(&self) -> usize {
        1 + self.genre_columns.len()
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Position of a movie's row, if the movie was part of the build
    pub fn position(&self, movie_id: MovieId) -> Option<usize> {
        self.positions.get(&movie_id).copied()
    }

    pub fn row(&self, movie_id: MovieId) -> Option<&FeatureRow> {
        self.position(movie_id).map(|pos| &self.rows[pos])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds a `FeatureTable` from the movies and ratings tables.
///
/// ## Algorithm
/// 1. Mean rating per movie id (movies without ratings get no entry)
/// 2. Left-join the means onto the movies table
/// 3. One indicator column per distinct genre label in the whole table
/// 4. Row = [mean or 0.0, indicators...]
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, movies: &[Movie], ratings: &[Rating]) -> Result<FeatureTable> {
        let means = mean_ratings(ratings);
        let genre_columns = genre_columns(movies);

        let column_index: HashMap<&str, usize> = genre_columns
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();

        let mut positions = HashMap::with_capacity(movies.len());
        for (pos, movie) in movies.iter().enumerate() {
            if positions.insert(movie.id, pos).is_some() {
                return Err(RecommendError::DataIntegrity(format!(
                    "movie id {} appears more than once; the rating join is ambiguous",
                    movie.id
                )));
            }
        }

        let width = 1 + genre_columns.len();
        let rows = movies
            .par_iter()
            .map(|movie| {
                let mean = means.get(&movie.id).copied().unwrap_or(0.0);
                if !mean.is_finite() {
                    return Err(RecommendError::DataIntegrity(format!(
                        "mean rating for movie id {} is not a number",
                        movie.id
                    )));
                }

                let mut values = vec![0.0; width];
                values[0] = mean;
                // Columns come from these same labels, so every lookup hits
                for label in movie.genre_labels() {
                    values[1 + column_index[label]] = 1.0;
                }

                Ok(FeatureRow {
                    movie_id: movie.id,
                    values,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Built {} feature rows with {} genre columns",
            rows.len(),
            genre_columns.len()
        );

        Ok(FeatureTable {
            genre_columns,
            rows,
            positions,
        })
    }
}

/// Arithmetic mean of each movie's ratings
pub fn mean_ratings(ratings: &[Rating]) -> HashMap<MovieId, f64> {
    let mut totals: HashMap<MovieId, (f64, u32)> = HashMap::new();
    for rating in ratings {
        let entry = totals.entry(rating.movie_id).or_insert((0.0, 0));
        entry.0 += rating.rating;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(movie_id, (total, count))| (movie_id, total / count as f64))
        .collect()
}

/// Distinct genre labels across all movies, sorted
pub fn genre_columns(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .flat_map(|movie| movie.genre_labels())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
