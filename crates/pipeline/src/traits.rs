//! Core traits for the filtering pipeline.
//!
//! This module defines the MovieFilter trait that allows composable
//! filters to be applied to the movies table.

use crate::error::Result;
use data_loader::Movie;

/// Core trait for filtering movies.
///
/// Filters borrow from the movies table and never reorder it: the output
/// keeps the relative order of the input.
pub trait MovieFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the movies this filter accepts.
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>>;
}
