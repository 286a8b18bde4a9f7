//! Query Path: read-only ranking, search, and the optional watch stream.
//!
//! Everything here reads committed state and promises nothing across
//! separate calls beyond eventual consistency with the ledger's commits.

pub mod actions;
pub mod score;
pub mod watch;

pub use actions::{get_faculty, list_faculties, rank_top, search};
pub use score::overall_score;
pub use watch::watch_faculty;
