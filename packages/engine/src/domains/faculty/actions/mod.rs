pub mod create_faculty;

pub use create_faculty::create_faculty;
