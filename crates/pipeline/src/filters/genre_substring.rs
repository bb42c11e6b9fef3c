//! Filter to keep movies whose genre string contains a query.
//!
//! This is a substring test on the raw pipe-delimited string, not an exact
//! category match: "Sci" matches "Sci-Fi", "Action|Comedy" matches only
//! that exact adjacent pair.

use crate::error::Result;
use crate::traits::MovieFilter;
use data_loader::Movie;

/// Case-insensitive substring match on `Movie::genres`.
pub struct GenreSubstringFilter {
    genre: String,
}

impl GenreSubstringFilter {
    pub fn new(genre: &str) -> Self {
        Self {
            genre: genre.to_lowercase(),
        }
    }
}

impl MovieFilter for GenreSubstringFilter {
    fn name(&self) -> &str {
        "GenreSubstringFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>> {
        Ok(movies
            .into_iter()
            .filter(|movie| movie.genres.to_lowercase().contains(&self.genre))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_movies() -> Vec<Movie> {
        vec![
            Movie::new(1, "A", "Action|Comedy"),
            Movie::new(2, "B", "Comedy"),
            Movie::new(3, "C", "Drama"),
            Movie::new(4, "D", "Sci-Fi|Thriller"),
        ]
    }

    #[test]
    fn test_genre_substring_filter() {
        let movies = create_movies();
        let filter = GenreSubstringFilter::new("cOmEdY");

        let filtered = filter.apply(movies.iter().collect()).unwrap();

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().any(|m| m.id == 1));
        assert!(filtered.iter().any(|m| m.id == 2));
    }

    #[test]
    fn test_partial_label_matches() {
        let movies = create_movies();
        let filtered = GenreSubstringFilter::new("sci")
            .apply(movies.iter().collect())
            .unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 4);
    }

    #[test]
    fn test_no_match() {
        let movies = create_movies();
        let filtered = GenreSubstringFilter::new("Western")
            .apply(movies.iter().collect())
            .unwrap();

        assert!(filtered.is_empty());
    }
}
