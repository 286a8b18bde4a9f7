// Faculty Rating Aggregation & Moderation Engine
//
// This crate keeps per-faculty aggregate statistics exactly consistent with
// the full set of submitted reviews under concurrent writers, and governs
// the moderation lifecycle of proposed-but-unverified faculty entities.
//
// Presentation (routing, rendering, session handling) lives outside this
// crate; callers pass an `Identity` value obtained from the external
// authentication collaborator and consume plain data models.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
