//! Recommendation entry points.
//!
//! - `Recommender::similar_to_title`: title substring match, then the
//!   nearest neighbors of every matched movie in feature space
//! - `movies_by_genre`: genre substring filter, table order
//! - `list_genres`: every distinct genre label, sorted
//!
//! Nothing is cached between calls: each title lookup builds its own
//! feature table and neighbor index and drops both before returning.

use std::time::Instant;

use data_loader::{Movie, MovieId, Rating};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{NeighborError, Result};
use crate::features::{FeatureBuilder, FeatureTable, genre_columns};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{GenreSubstringFilter, TitleSubstringFilter};
use crate::neighbors::NeighborIndex;

/// Neighbors fetched per matched movie; the movie itself takes one slot
pub const DEFAULT_NEIGHBORS: usize = 5;

/// A movie recommended because it is close to a matched movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    pub distance: f64,
}

/// What happened for one matched movie
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    Recommended { recommendations: Vec<Recommendation> },
    /// The movie has no row in the feature table
    MissingFeatures,
    /// The neighbor lookup failed for this movie only
    Failed { reason: String },
}

/// A movie whose title matched the query, with its own result block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    pub outcome: MatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "matches", rename_all = "snake_case")]
pub enum TitleSearch {
    NotFound,
    Found(Vec<MatchedMovie>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenreSearch<'a> {
    NotFound,
    Found(Vec<&'a Movie>),
}

/// k-nearest-neighbor recommender over mean rating + genre flags.
#[derive(Debug, Clone, Copy)]
pub struct Recommender {
    neighbors: usize,
    features: FeatureBuilder,
}

impl Recommender {
    /// `neighbors` hits are fetched per matched movie, so at most
    /// `neighbors - 1` recommendations come back for each.
    pub fn new(neighbors: usize) -> Self {
        Self {
            neighbors,
            features: FeatureBuilder::new(),
        }
    }

    pub fn neighbors(&self) -> usize {
        self.neighbors
    }

    /// Movies similar to every movie whose title contains `query`.
    ///
    /// ## Algorithm
    /// 1. Trim + lowercase the query, substring-match titles
    /// 2. Build the feature table over all movies
    /// 3. Fit the neighbor index over all rows
    /// 4. Per matched movie: fetch its neighbors, drop the movie itself,
    ///    keep the rest in distance order
    ///
    /// A data-integrity failure aborts the whole call. Lookup failures are
    /// recorded on the affected movie and the loop moves on.
    pub fn similar_to_title(
        &self,
        movies: &[Movie],
        ratings: &[Rating],
        query: &str,
    ) -> Result<TitleSearch> {
        let start = Instant::now();

        let matched = FilterPipeline::new()
            .add_filter(TitleSubstringFilter::new(query))
            .apply(movies)?;
        if matched.is_empty() {
            info!("No title matches for query {:?}", query);
            return Ok(TitleSearch::NotFound);
        }

        let table = self.features.build(movies, ratings)?;
        let index = NeighborIndex::fit(&table, self.neighbors);

        let results: Vec<MatchedMovie> = matched
            .into_iter()
            .map(|movie| MatchedMovie {
                movie_id: movie.id,
                title: movie.title.clone(),
                genres: movie.genres.clone(),
                outcome: self.lookup(movie, movies, &table, &index),
            })
            .collect();

        info!(
            "Title query {:?} matched {} movies ({} feature rows) in {:.2?}",
            query,
            results.len(),
            table.len(),
            start.elapsed()
        );
        Ok(TitleSearch::Found(results))
    }

    fn lookup(
        &self,
        movie: &Movie,
        movies: &[Movie],
        table: &FeatureTable,
        index: &std::result::Result<NeighborIndex<'_>, NeighborError>,
    ) -> MatchOutcome {
        let Some(row) = table.row(movie.id) else {
            warn!("Movie id {} not found in prepared features", movie.id);
            return MatchOutcome::MissingFeatures;
        };

        let index = match index {
            Ok(index) => index,
            Err(err) => {
                return MatchOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        let hits = match index.kneighbors(&row.values) {
            Ok(hits) => hits,
            Err(err) => {
                warn!("Neighbor lookup failed for movie id {}: {}", movie.id, err);
                return MatchOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        // `fit` guarantees at least one neighbor
        let keep = index.neighbors() - 1;
        let mut recommendations = Vec::with_capacity(keep);
        for hit in hits.into_iter().filter(|h| h.movie_id != movie.id).take(keep) {
            let Some(found) = movies.get(hit.row) else {
                return MatchOutcome::Failed {
                    reason: format!("feature row {} has no movie", hit.row),
                };
            };
            recommendations.push(Recommendation {
                movie_id: found.id,
                title: found.title.clone(),
                genres: found.genres.clone(),
                distance: hit.distance,
            });
        }

        MatchOutcome::Recommended { recommendations }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBORS)
    }
}

/// Movies whose genre string contains `genre`, case-insensitively, in table order
pub fn movies_by_genre<'a>(movies: &'a [Movie], genre: &str) -> Result<GenreSearch<'a>> {
    let matched = FilterPipeline::new()
        .add_filter(GenreSubstringFilter::new(genre))
        .apply(movies)?;

    if matched.is_empty() {
        info!("No movies found for genre {:?}", genre);
        Ok(GenreSearch::NotFound)
    } else {
        Ok(GenreSearch::Found(matched))
    }
}

/// Every distinct genre label across `movies`, sorted
pub fn list_genres(movies: &[Movie]) -> Vec<String> {
    genre_columns(movies)
}
