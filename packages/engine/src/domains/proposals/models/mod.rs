pub mod proposal;

pub use proposal::{Proposal, ProposalStatus};
