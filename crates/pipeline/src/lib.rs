//! Feature building, neighbor search and filtering for movie recommendations.
//!
//! This crate provides:
//! - MovieFilter trait and implementations for title / genre matching
//! - FilterPipeline for composing filters
//! - FeatureBuilder for the per-movie feature vectors
//! - NeighborIndex for k-nearest-neighbor lookups
//! - Recommender tying the above together
//!
//! ## Architecture
//! A similar-movies request runs in stages:
//! 1. Filters pick the movies whose title matches the query
//! 2. FeatureBuilder turns the whole movies table into numeric rows
//! 3. NeighborIndex finds the closest rows to every matched movie
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Recommender, TitleSearch};
//!
//! let recommender = Recommender::new(5);
//! match recommender.similar_to_title(dataset.movies(), dataset.ratings(), "toy story")? {
//!     TitleSearch::NotFound => println!("no such movie"),
//!     TitleSearch::Found(matches) => { /* one block per matched movie */ }
//! }
//! ```

pub mod error;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod features;
pub mod neighbors;
pub mod recommend;

// Re-export main types
pub use error::{NeighborError, RecommendError, Result};
pub use traits::MovieFilter;
pub use filter_pipeline::FilterPipeline;
pub use features::{FeatureBuilder, FeatureRow, FeatureTable};
pub use neighbors::{Neighbor, NeighborIndex};
pub use recommend::{
    DEFAULT_NEIGHBORS, GenreSearch, MatchOutcome, MatchedMovie, Recommendation, Recommender,
    TitleSearch, list_genres, movies_by_genre,
};
