//! Create proposal action - a verified submitter asks for a new faculty.

use tracing::info;

use crate::common::EngineError;
use crate::domains::faculty::models::Faculty;
use crate::domains::identity::{require_verified, Identity};
use crate::kernel::EngineDeps;

use super::super::models::Proposal;

/// File a proposal for a not-yet-listed faculty.
///
/// Requires a domain-verified identity. Proposing a name that already
/// normalizes onto an existing faculty, or onto a proposal still awaiting
/// moderation, is rejected up front with `DuplicateEntity` — the right
/// move for the caller is selecting the existing entry or waiting for the
/// pending decision.
pub async fn create_proposal(
    identity: Option<&Identity>,
    proposed_name: &str,
    evidence_url: &str,
    notes: Option<&str>,
    deps: &EngineDeps,
) -> Result<Proposal, EngineError> {
    let identity = require_verified(identity)?;

    let proposed_name = proposed_name.trim();
    if proposed_name.is_empty() {
        return Err(EngineError::Validation(
            "proposed name cannot be empty".to_string(),
        ));
    }
    let evidence_url = evidence_url.trim();
    if evidence_url.is_empty() {
        return Err(EngineError::Validation(
            "an evidence URL is required".to_string(),
        ));
    }

    let normalized = Faculty::normalize_name(proposed_name);
    if normalized.is_empty() {
        return Err(EngineError::Validation(format!(
            "\"{proposed_name}\" does not contain a usable name"
        )));
    }

    let mut conn = deps.db_pool.acquire().await?;
    if Faculty::find_by_normalized_name(&normalized, &mut conn)
        .await?
        .is_some()
    {
        return Err(EngineError::DuplicateEntity(normalized));
    }
    drop(conn);

    // A still-pending proposal for the same name is also a duplicate; the
    // caller should wait for moderation rather than file it again
    if Proposal::pending_exists_for_name(&normalized, &deps.db_pool).await? {
        return Err(EngineError::DuplicateEntity(normalized));
    }

    let notes = notes.map(str::trim).filter(|n| !n.is_empty());
    let proposal = Proposal::insert(
        proposed_name,
        &normalized,
        evidence_url,
        notes,
        identity,
        &deps.db_pool,
    )
    .await?;

    info!(
        "Proposal {} filed for \"{}\" by {}",
        proposal.id, proposed_name, identity.email
    );

    Ok(proposal)
}
