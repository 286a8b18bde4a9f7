//! Proposal Workflow: the two-state moderation machine that turns a
//! proposed name plus evidence into an approved faculty or a terminal
//! rejection.

pub mod actions;
pub mod models;

pub use actions::{approve_proposal, create_proposal, list_pending, reject_proposal};
pub use models::{Proposal, ProposalStatus};
