//! Typed ID definitions for domain entities.
//!
//! Faculty IDs are human-readable slugs and live in
//! `domains::faculty::models` as [`FacultyId`](crate::domains::faculty::models::FacultyId);
//! everything else is a typed UUID.

pub use super::id::Id;

/// Marker type for Review entities.
pub struct Review;

/// Marker type for Proposal entities.
pub struct Proposal;

/// Marker type for identities minted by the external auth collaborator.
pub struct Identity;

/// Typed ID for Review entities.
pub type ReviewId = Id<Review>;

/// Typed ID for Proposal entities.
pub type ProposalId = Id<Proposal>;

/// Typed ID for submitter/admin identities.
pub type IdentityId = Id<Identity>;
