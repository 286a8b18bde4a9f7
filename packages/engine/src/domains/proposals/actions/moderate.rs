//! Approve / reject actions - the terminal moderation transitions.
//!
//! Approval creates the faculty and flips the proposal in one serializable
//! transaction: both rows commit together or neither does. The `FOR UPDATE`
//! re-read inside the transaction is the race guard that upholds the
//! at-most-one-faculty invariant when two admins act concurrently.

use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::common::{EngineError, ProposalId};
use crate::domains::faculty::models::Faculty;
use crate::domains::identity::{require_admin, Identity};
use crate::kernel::db::{begin_serializable, is_retryable, MAX_TX_ATTEMPTS};
use crate::kernel::EngineDeps;

use super::super::models::{Proposal, ProposalStatus};

/// Approve a pending proposal, creating the faculty it asked for.
///
/// The second of two concurrent approvers fails with `AlreadyProcessed`;
/// if a same-named faculty appeared through another path in the interim,
/// the approval fails with `DuplicateEntity` and the proposal stays
/// pending.
pub async fn approve_proposal(
    admin: Option<&Identity>,
    proposal_id: ProposalId,
    deps: &EngineDeps,
) -> Result<Faculty, EngineError> {
    let admin = require_admin(admin, &deps.db_pool).await?;

    let mut attempts = 0u32;
    let faculty = loop {
        attempts += 1;
        let mut tx = begin_serializable(&deps.db_pool).await?;

        match approve_in_tx(&mut tx, proposal_id, admin).await {
            Ok(faculty) => match tx.commit().await {
                Ok(()) => break faculty,
                Err(err) if is_retryable(&err) => {
                    if attempts >= MAX_TX_ATTEMPTS {
                        return Err(EngineError::TransactionConflict { attempts });
                    }
                    warn!(
                        "Approval of {} conflicted at commit (attempt {}), retrying",
                        proposal_id, attempts
                    );
                }
                Err(err) => return Err(err.into()),
            },
            Err(EngineError::Database(ref err)) if is_retryable(err) => {
                if attempts >= MAX_TX_ATTEMPTS {
                    return Err(EngineError::TransactionConflict { attempts });
                }
                warn!(
                    "Approval of {} conflicted (attempt {}), retrying",
                    proposal_id, attempts
                );
            }
            Err(err) => return Err(err),
        }
    };

    info!(
        "Proposal {} approved by {}; faculty {} created",
        proposal_id, admin.email, faculty.id
    );

    Ok(faculty)
}

async fn approve_in_tx(
    tx: &mut Transaction<'static, Postgres>,
    proposal_id: ProposalId,
    admin: &Identity,
) -> Result<Faculty, EngineError> {
    let proposal = Proposal::find_by_id_for_update(proposal_id, &mut *tx)
        .await?
        .ok_or_else(|| EngineError::not_found("Proposal", proposal_id))?;

    if !proposal.is_pending() {
        return Err(EngineError::AlreadyProcessed(proposal_id));
    }

    if Faculty::find_by_normalized_name(&proposal.normalized_name, &mut *tx)
        .await?
        .is_some()
    {
        return Err(EngineError::DuplicateEntity(proposal.normalized_name));
    }

    let faculty = Faculty::insert_new(
        &proposal.proposed_name,
        None,
        Some(proposal.id),
        &mut *tx,
    )
    .await?;

    Proposal::mark_processed(
        proposal_id,
        ProposalStatus::Approved,
        admin,
        None,
        &mut *tx,
    )
    .await?;

    Ok(faculty)
}

/// Reject a pending proposal. Terminal for the proposal record; the name
/// itself may be proposed again later.
pub async fn reject_proposal(
    admin: Option<&Identity>,
    proposal_id: ProposalId,
    notes: Option<&str>,
    deps: &EngineDeps,
) -> Result<Proposal, EngineError> {
    let admin = require_admin(admin, &deps.db_pool).await?;

    let mut attempts = 0u32;
    let proposal = loop {
        attempts += 1;
        let mut tx = begin_serializable(&deps.db_pool).await?;

        match reject_in_tx(&mut tx, proposal_id, admin, notes).await {
            Ok(proposal) => match tx.commit().await {
                Ok(()) => break proposal,
                Err(err) if is_retryable(&err) => {
                    if attempts >= MAX_TX_ATTEMPTS {
                        return Err(EngineError::TransactionConflict { attempts });
                    }
                    warn!(
                        "Rejection of {} conflicted at commit (attempt {}), retrying",
                        proposal_id, attempts
                    );
                }
                Err(err) => return Err(err.into()),
            },
            Err(EngineError::Database(ref err)) if is_retryable(err) => {
                if attempts >= MAX_TX_ATTEMPTS {
                    return Err(EngineError::TransactionConflict { attempts });
                }
                warn!(
                    "Rejection of {} conflicted (attempt {}), retrying",
                    proposal_id, attempts
                );
            }
            Err(err) => return Err(err),
        }
    };

    info!("Proposal {} rejected by {}", proposal_id, admin.email);

    Ok(proposal)
}

async fn reject_in_tx(
    tx: &mut Transaction<'static, Postgres>,
    proposal_id: ProposalId,
    admin: &Identity,
    notes: Option<&str>,
) -> Result<Proposal, EngineError> {
    let proposal = Proposal::find_by_id_for_update(proposal_id, &mut *tx)
        .await?
        .ok_or_else(|| EngineError::not_found("Proposal", proposal_id))?;

    if !proposal.is_pending() {
        return Err(EngineError::AlreadyProcessed(proposal_id));
    }

    let proposal =
        Proposal::mark_processed(proposal_id, ProposalStatus::Rejected, admin, notes, &mut *tx)
            .await?;

    Ok(proposal)
}
