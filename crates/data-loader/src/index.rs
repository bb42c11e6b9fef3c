//! Dataset building.
//!
//! - Parse the two files (in parallel)
//! - Build the id -> position lookup, rejecting duplicate movie ids

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

impl Dataset {
    /// Load both tables from disk.
    ///
    /// Steps:
    /// 1. Parse the movies and ratings files in parallel
    /// 2. Build the Dataset (fails on duplicate movie ids)
    pub fn load_from_files(movies_path: &Path, ratings_path: &Path) -> Result<Self> {
        info!(
            "Loading movies from {:?} and ratings from {:?}",
            movies_path, ratings_path
        );

        // Rayon's `join` runs both parsers in parallel
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_ratings(ratings_path),
        );

        Self::from_parts(movies?, ratings?)
    }

    /// Build a Dataset from already parsed tables
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>) -> Result<Self> {
        let mut dataset = Dataset::new();

        for movie in movies {
            dataset.insert_movie(movie)?;
        }
        for rating in ratings {
            dataset.insert_rating(rating);
        }

        let orphans = dataset.orphan_rating_count();
        if orphans > 0 {
            debug!("{} ratings reference movies that are not in the movies table", orphans);
        }

        let (movies, ratings) = dataset.counts();
        info!("Loaded {} movies, {} ratings", movies, ratings);
        Ok(dataset)
    }

    /// Ratings whose movie id has no movie; these never reach a feature row
    pub fn orphan_rating_count(&self) -> usize {
        self.ratings
            .iter()
            .filter(|r| !self.movie_positions.contains_key(&r.movie_id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let movies = write_file(
            dir.path(),
            "movies.csv",
            "movieId,title,genres\n1,A,Action|Comedy\n2,B,Comedy\n3,C,Drama\n",
        );
        let ratings = write_file(
            dir.path(),
            "ratings.csv",
            "userId,movieId,rating,timestamp\n1,1,4.0,0\n2,1,5.0,0\n1,2,3.0,0\n",
        );

        let dataset = Dataset::load_from_files(&movies, &ratings).unwrap();

        assert_eq!(dataset.counts(), (3, 3));
        assert_eq!(dataset.get_movie(3).unwrap().title, "C");
    }

    #[test]
    fn test_duplicate_movie_rejected() {
        let movies = vec![Movie::new(1, "A", "Drama"), Movie::new(1, "A again", "Drama")];
        let err = Dataset::from_parts(movies, Vec::new()).unwrap_err();

        assert!(matches!(err, DataLoadError::DuplicateMovie { id: 1 }));
    }

    #[test]
    fn test_any_rating_scale_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let movies = write_file(
            dir.path(),
            "movies.csv",
            "movieId,title,genres\n1,A,Action|Comedy\n2,B,Comedy\n",
        );
        let ratings = write_file(
            dir.path(),
            "ratings.csv",
            "movieId,rating\n1,8.0\n2,6.5\n2,-1.0\n",
        );

        let dataset = Dataset::load_from_files(&movies, &ratings).unwrap();

        let values: Vec<f64> = dataset.ratings().iter().map(|r| r.rating).collect();
        assert_eq!(values, vec![8.0, 6.5, -1.0]);
    }

    #[test]
    fn test_orphan_ratings_are_kept() {
        let movies = vec![Movie::new(1, "A", "Drama")];
        let ratings = vec![Rating::new(1, 4.0), Rating::new(99, 2.0)];
        let dataset = Dataset::from_parts(movies, ratings).unwrap();

        assert_eq!(dataset.orphan_rating_count(), 1);
        assert_eq!(dataset.ratings().len(), 2);
    }
}
