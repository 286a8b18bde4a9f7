use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{IdentityId, ProposalId};
use crate::domains::identity::Identity;

/// A request to add a new faculty, subject to admin moderation.
///
/// Mutated exactly once: from `pending` to a terminal status, with the
/// moderation metadata set on that transition. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposed_name: String,
    pub normalized_name: String,
    pub evidence_url: String,
    pub notes: Option<String>,

    // Proposals are never anonymous
    pub submitted_by_id: IdentityId,
    pub submitted_by_email: String,

    /// 'pending', 'approved', 'rejected'
    pub status: String,

    pub reviewed_by_id: Option<IdentityId>,
    pub reviewed_by_email: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub moderator_notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Proposal lifecycle: pending -> {approved, rejected}, both terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProposalStatus::Pending => write!(f, "pending"),
            ProposalStatus::Approved => write!(f, "approved"),
            ProposalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ProposalStatus::Pending),
            "approved" => Ok(ProposalStatus::Approved),
            "rejected" => Ok(ProposalStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid proposal status: {}", s)),
        }
    }
}

impl Proposal {
    pub fn status(&self) -> ProposalStatus {
        self.status.parse().unwrap_or(ProposalStatus::Pending)
    }

    pub fn is_pending(&self) -> bool {
        self.status == ProposalStatus::Pending.to_string()
    }

    // =========================================================================
    // SQL queries - ALL queries for proposals live here
    // =========================================================================

    pub async fn insert(
        proposed_name: &str,
        normalized_name: &str,
        evidence_url: &str,
        notes: Option<&str>,
        submitted_by: &Identity,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            INSERT INTO proposals
                (id, proposed_name, normalized_name, evidence_url, notes,
                 submitted_by_id, submitted_by_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(ProposalId::new())
        .bind(proposed_name)
        .bind(normalized_name)
        .bind(evidence_url)
        .bind(notes)
        .bind(submitted_by.id)
        .bind(&submitted_by.email)
        .fetch_one(pool)
        .await
    }

    /// Whether a pending proposal for this normalized name already exists.
    /// Backs the duplicate check in `create_proposal`.
    pub async fn pending_exists_for_name(
        normalized_name: &str,
        pool: &PgPool,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM proposals WHERE normalized_name = $1 AND status = 'pending')",
        )
        .bind(normalized_name)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    pub async fn find_by_id(id: ProposalId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Proposal>("SELECT * FROM proposals WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Transactional re-read with a row lock: the race guard for the
    /// moderation transitions. The second of two concurrent moderators
    /// always observes the first's committed status.
    pub async fn find_by_id_for_update(
        id: ProposalId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Proposal>("SELECT * FROM proposals WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Set a terminal status with moderator metadata, inside the caller's
    /// transaction.
    pub async fn mark_processed(
        id: ProposalId,
        status: ProposalStatus,
        moderator: &Identity,
        moderator_notes: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            UPDATE proposals
            SET status = $2,
                reviewed_by_id = $3,
                reviewed_by_email = $4,
                reviewed_at = now(),
                moderator_notes = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(moderator.id)
        .bind(&moderator.email)
        .bind(moderator_notes)
        .fetch_one(conn)
        .await
    }

    /// Pending proposals, newest first. Non-transactional; reflects
    /// last-committed state. Capped at 50 per page, like the admin panel
    /// consumes them.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(
            "SELECT * FROM proposals WHERE status = 'pending' ORDER BY created_at DESC LIMIT 50",
        )
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [
            ProposalStatus::Pending,
            ProposalStatus::Approved,
            ProposalStatus::Rejected,
        ] {
            assert_eq!(
                status.to_string().parse::<ProposalStatus>().unwrap(),
                status
            );
        }
        assert!("suspended".parse::<ProposalStatus>().is_err());
    }
}
