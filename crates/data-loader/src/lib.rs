//! # Data Loader Crate
//!
//! This crate loads the two tables a recommendation session works from:
//! a movies table (`movieId,title,genres`) and a ratings table
//! (`movieId,rating`), both as CSV with a header row.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Dataset)
//! - **parser**: Parse CSV files into Rust structs
//! - **index**: Build the Dataset from the two files
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(
//!     Path::new("data/movies.csv"),
//!     Path::new("data/ratings.csv"),
//! )?;
//!
//! let movie = dataset.get_movie(1).unwrap();
//! println!("{} [{}]", movie.title, movie.genres);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Dataset, GENRE_SEPARATOR, Movie, MovieId, Rating};
