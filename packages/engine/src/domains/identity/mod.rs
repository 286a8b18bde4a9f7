//! Identity Guard: the boundary to the external authentication collaborator.
//!
//! The engine never authenticates. It consumes an [`Identity`] value the
//! presentation layer obtained elsewhere, checks the campus email domain,
//! and looks up administrator status in the `admins` table.

pub mod guard;
pub mod models;

pub use guard::{require_verified, Identity, IdentityGuard};
pub use models::{require_admin, Admin};
