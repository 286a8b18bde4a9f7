pub mod faculty;
pub mod faculty_id;

pub use faculty::Faculty;
pub use faculty_id::FacultyId;
