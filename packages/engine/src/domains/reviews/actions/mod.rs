pub mod submit_review;

pub use submit_review::submit_review;
