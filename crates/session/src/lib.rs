//! Session crate for the ReelMatch recommender.
//!
//! This crate contains the orchestrator that holds one session's loaded
//! tables and turns user actions into reports.

pub mod orchestrator;
pub mod report;

pub use orchestrator::{Action, RecommenderConfig, SessionOrchestrator};
pub use report::{Notice, Report, movie_line};
pub use pipeline::DEFAULT_NEIGHBORS;
