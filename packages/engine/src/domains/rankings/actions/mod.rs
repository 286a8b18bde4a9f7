pub mod queries;

pub use queries::{get_faculty, list_faculties, rank_top, search};
