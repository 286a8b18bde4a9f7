//! Database plumbing: pool setup, migrations, and the serializable
//! transaction retry contract.
//!
//! Every write path in the engine (review submission, proposal moderation)
//! runs inside a transaction at `SERIALIZABLE` isolation and is re-run from
//! the top when Postgres aborts it with a serialization failure. Callers of
//! the domain actions only ever observe a clean commit or a terminal
//! [`EngineError`](crate::common::EngineError).

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::EngineError;
use crate::config::Config;

/// Upper bound on transparent transaction retries before surfacing
/// `EngineError::TransactionConflict` to the caller.
pub const MAX_TX_ATTEMPTS: u32 = 5;

/// Connect a pool using the configured database URL.
pub async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Run embedded sqlx migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    Ok(())
}

/// Begin a transaction at `SERIALIZABLE` isolation.
///
/// The isolation level must be set before the transaction's first snapshot-
/// taking statement, so this is the only sanctioned way for domain code to
/// open a write transaction.
pub async fn begin_serializable(
    pool: &PgPool,
) -> Result<Transaction<'static, Postgres>, EngineError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// Whether an error is a serialization failure (40001) or deadlock (40P01)
/// that a fresh attempt can resolve.
pub fn is_retryable(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().and_then(|db| db.code()).as_deref(),
        Some("40001") | Some("40P01")
    )
}

/// Whether an error is a unique constraint violation (23505). Insert sites
/// use this to map normalized-name collisions to `DuplicateEntity`.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().and_then(|db| db.code()).as_deref() == Some("23505")
}
