pub mod create_proposal;
pub mod moderate;
pub mod queries;

pub use create_proposal::create_proposal;
pub use moderate::{approve_proposal, reject_proposal};
pub use queries::list_pending;
