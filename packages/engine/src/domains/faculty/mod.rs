//! Entity Registry: owns Faculty records, name normalization, and the
//! normalized-name uniqueness invariant.

pub mod actions;
pub mod models;

pub use models::{Faculty, FacultyId};
