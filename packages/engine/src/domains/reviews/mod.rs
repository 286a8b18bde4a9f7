//! Review Ledger & Aggregator: appends immutable reviews and recomputes the
//! owning faculty's aggregates in one atomic transaction.

pub mod actions;
pub mod models;

pub use actions::submit_review;
pub use models::{Aggregates, ClassAverage, RatingSet, Review};
