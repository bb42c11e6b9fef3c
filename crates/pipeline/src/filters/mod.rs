//! Filter implementations for the movies table.
//!
//! This module contains the concrete filters that can be composed
//! into a FilterPipeline.

pub mod genre_substring;
pub mod title_substring;

// Re-export for convenience
pub use genre_substring::GenreSubstringFilter;
pub use title_substring::TitleSubstringFilter;
