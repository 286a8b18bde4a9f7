use thiserror::Error;

use super::entity_ids::ProposalId;

/// Error taxonomy for the rating and moderation engine.
///
/// `Validation` and `Authorization` are detected before any transaction
/// starts; the rest surface as a transaction's terminal result. A failed
/// call never leaves partial writes behind.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed or out-of-range input, caught before any write
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or insufficient identity
    #[error("Not authorized: {0}")]
    Authorization(String),

    /// Normalized-name collision with an existing faculty
    #[error("Entity already exists: {0}")]
    DuplicateEntity(String),

    /// Referenced faculty or proposal does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Proposal is no longer pending
    #[error("Proposal already processed: {0}")]
    AlreadyProcessed(ProposalId),

    /// Retries exhausted under write contention. Safe to retry from the
    /// caller: a fresh attempt re-reads current state.
    #[error("Transaction aborted after {attempts} attempts under contention")]
    TransactionConflict { attempts: u32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl EngineError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
