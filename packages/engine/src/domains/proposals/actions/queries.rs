//! Proposal read actions.

use crate::common::EngineError;
use crate::domains::identity::{require_admin, Identity};
use crate::kernel::EngineDeps;

use super::super::models::Proposal;

/// Pending proposals for the moderation queue, newest first. Admin-only,
/// like the rest of the moderation surface.
pub async fn list_pending(
    admin: Option<&Identity>,
    deps: &EngineDeps,
) -> Result<Vec<Proposal>, EngineError> {
    require_admin(admin, &deps.db_pool).await?;
    Ok(Proposal::list_pending(&deps.db_pool).await?)
}
