//! Engine dependencies threaded through domain actions.

use anyhow::Result;
use sqlx::PgPool;

use crate::config::Config;
use crate::domains::identity::IdentityGuard;
use crate::kernel::db;
use crate::kernel::stream_hub::StreamHub;

/// Dependency container passed to every domain action.
///
/// Identity arrives as an explicit value per call; this holds only the
/// shared infrastructure (pool, guard configuration, update hub).
#[derive(Clone)]
pub struct EngineDeps {
    pub db_pool: PgPool,
    pub guard: IdentityGuard,
    pub hub: StreamHub,
}

impl EngineDeps {
    pub fn new(db_pool: PgPool, guard: IdentityGuard) -> Self {
        Self {
            db_pool,
            guard,
            hub: StreamHub::new(),
        }
    }

    /// Connect, migrate, and assemble dependencies from configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        db::run_migrations(&pool).await?;
        Ok(Self::new(
            pool,
            IdentityGuard::new(&config.allowed_email_domain),
        ))
    }
}
