//! Filter to keep movies whose title contains a search query.

use crate::error::Result;
use crate::traits::MovieFilter;
use data_loader::Movie;

/// Case-insensitive substring match on the title.
///
/// The query is trimmed and lowercased once, at construction.
pub struct TitleSubstringFilter {
    query: String,
}

impl TitleSubstringFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
        }
    }

    /// The normalized query
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl MovieFilter for TitleSubstringFilter {
    fn name(&self) -> &str {
        "TitleSubstringFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>> {
        Ok(movies
            .into_iter()
            .filter(|movie| movie.title.to_lowercase().contains(&self.query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        let movies = vec![
            Movie::new(1, "Spider-Man (2002)", "Action|Adventure"),
            Movie::new(2, "Iron Man (2008)", "Action|Sci-Fi"),
            Movie::new(3, "Heat (1995)", "Crime"),
        ];

        let filter = TitleSubstringFilter::new("  MAN ");
        let filtered = filter.apply(movies.iter().collect()).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(filter.query(), "man");
    }
}
