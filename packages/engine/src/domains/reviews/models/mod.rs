pub mod aggregates;
pub mod class_average;
pub mod rating_set;
pub mod review;

pub use aggregates::{Aggregates, RatingRow};
pub use class_average::ClassAverage;
pub use rating_set::RatingSet;
pub use review::Review;
