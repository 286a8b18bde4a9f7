use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EngineError, IdentityId};
use crate::domains::identity::Identity;

/// A recognized administrator. Row existence is the grant — there are no
/// per-admin capability levels.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub id: IdentityId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    /// Grant admin status. Idempotent.
    pub async fn grant(id: IdentityId, email: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("INSERT INTO admins (id, email) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .bind(email)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn is_admin(id: IdentityId, pool: &PgPool) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM admins WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }
}

/// Require that the acting identity is a recognized administrator.
///
/// Checked against committed state before the moderation transaction
/// starts; admin revocation between check and commit is out of scope.
pub async fn require_admin<'a>(
    identity: Option<&'a Identity>,
    pool: &PgPool,
) -> Result<&'a Identity, EngineError> {
    let identity = identity.ok_or_else(|| {
        EngineError::Authorization("sign-in is required for admin actions".to_string())
    })?;

    if !Admin::is_admin(identity.id, pool).await? {
        return Err(EngineError::Authorization(format!(
            "{} is not an administrator",
            identity.email
        )));
    }

    Ok(identity)
}
