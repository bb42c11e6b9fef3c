//! Brute-force k-nearest-neighbor search over a `FeatureTable`.
//!
//! Distances are Euclidean over the whole row (mean rating and every genre
//! flag). Results are ordered by ascending distance, ties by ascending
//! movie id, so the same table always yields the same neighbors.

use data_loader::MovieId;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

use crate::error::NeighborError;
use crate::features::FeatureTable;

/// One search hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    /// Row position in the fitted table
    pub row: usize,
    pub movie_id: MovieId,
    pub distance: f64,
}

/// Neighbor search fitted on a borrowed feature table.
pub struct NeighborIndex<'a> {
    table: &'a FeatureTable,
    neighbors: usize,
}

impl<'a> NeighborIndex<'a> {
    /// Fit an index returning `neighbors` hits per query.
    pub fn fit(table: &'a FeatureTable, neighbors: usize) -> Result<Self, NeighborError> {
        if neighbors == 0 {
            return Err(NeighborError::InvalidNeighborCount(neighbors));
        }
        if table.is_empty() {
            return Err(NeighborError::EmptyIndex);
        }
        Ok(Self { table, neighbors })
    }

    pub fn neighbors(&self) -> usize {
        self.neighbors
    }

    /// The `neighbors` rows closest to `query`, nearest first.
    pub fn kneighbors(&self, query: &[f64]) -> Result<Vec<Neighbor>, NeighborError> {
        let samples = self.table.len();
        if self.neighbors > samples {
            return Err(NeighborError::TooFewSamples {
                requested: self.neighbors,
                samples,
            });
        }
        let width = self.table.width();
        if query.len() != width {
            return Err(NeighborError::DimensionMismatch {
                expected: width,
                found: query.len(),
            });
        }

        let mut hits: Vec<Neighbor> = self
            .table
            .rows()
            .par_iter()
            .enumerate()
            .map(|(row, features)| Neighbor {
                row,
                movie_id: features.movie_id,
                distance: euclidean(query, &features.values),
            })
            .collect();

        // Partition first so only the kept hits get fully sorted
        if self.neighbors < hits.len() {
            hits.select_nth_unstable_by(self.neighbors - 1, nearest_first);
            hits.truncate(self.neighbors);
        }
        hits.sort_unstable_by(nearest_first);
        Ok(hits)
    }
}

fn nearest_first(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.movie_id.cmp(&b.movie_id))
}

/// Euclidean distance between two equally sized vectors
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureBuilder;
    use data_loader::{Movie, Rating};

    fn build_table() -> FeatureTable {
        let movies = vec![
            Movie::new(1, "A", "Action|Comedy"),
            Movie::new(2, "B", "Comedy"),
            Movie::new(3, "C", "Drama"),
            Movie::new(4, "D", "Action|Comedy"),
        ];
        let ratings = vec![
            Rating::new(1, 4.0),
            Rating::new(1, 5.0),
            Rating::new(2, 3.0),
            Rating::new(4, 4.5),
        ];
        FeatureBuilder::new().build(&movies, &ratings).unwrap()
    }

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_nearest_is_self_then_identical_twin() {
        let table = build_table();
        let index = NeighborIndex::fit(&table, 3).unwrap();

        let hits = index.kneighbors(&table.row(1).unwrap().values).unwrap();
        let ids: Vec<MovieId> = hits.iter().map(|h| h.movie_id).collect();

        // Movies 1 and 4 share the same vector; ties go to the lower id
        assert_eq!(ids, vec![1, 4, 2]);
        assert_eq!(hits[0].distance, 0.0);
        assert_eq!(hits[1].distance, 0.0);
    }

    #[test]
    fn test_results_are_sorted() {
        let table = build_table();
        let index = NeighborIndex::fit(&table, 4).unwrap();

        let hits = index.kneighbors(&table.row(3).unwrap().values).unwrap();
        assert_eq!(hits.len(), 4);
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_too_many_neighbors() {
        let table = build_table();
        let index = NeighborIndex::fit(&table, 5).unwrap();

        let err = index.kneighbors(&table.row(1).unwrap().values).unwrap_err();
        assert_eq!(
            err,
            NeighborError::TooFewSamples {
                requested: 5,
                samples: 4
            }
        );
    }

    #[test]
    fn test_zero_neighbors_rejected() {
        let table = build_table();
        assert!(matches!(
            NeighborIndex::fit(&table, 0),
            Err(NeighborError::InvalidNeighborCount(0))
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let table = build_table();
        let index = NeighborIndex::fit(&table, 1).unwrap();

        let err = index.kneighbors(&[1.0]).unwrap_err();
        assert!(matches!(err, NeighborError::DimensionMismatch { .. }));
    }
}
