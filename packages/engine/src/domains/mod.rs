// Business domains
pub mod faculty;
pub mod identity;
pub mod proposals;
pub mod rankings;
pub mod reviews;
