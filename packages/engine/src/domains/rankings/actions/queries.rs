//! Read-only query actions over committed registry state.

use tracing::debug;

use crate::common::EngineError;
use crate::domains::faculty::models::{Faculty, FacultyId};
use crate::kernel::EngineDeps;

/// Fetch one faculty by id.
pub async fn get_faculty(id: &FacultyId, deps: &EngineDeps) -> Result<Faculty, EngineError> {
    Faculty::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or_else(|| EngineError::not_found("Faculty", id))
}

/// Every listed faculty, alphabetical.
pub async fn list_faculties(deps: &EngineDeps) -> Result<Vec<Faculty>, EngineError> {
    Ok(Faculty::find_all(&deps.db_pool).await?)
}

/// Top-n faculties by the canonical combined score, deterministic across
/// calls with no intervening writes.
pub async fn rank_top(n: i64, deps: &EngineDeps) -> Result<Vec<Faculty>, EngineError> {
    debug!("Ranking top {} faculties", n);
    Ok(Faculty::rank_top(n, &deps.db_pool).await?)
}

/// Case-insensitive substring search on display names, optionally filtered
/// by department.
pub async fn search(
    query: &str,
    department: Option<&str>,
    deps: &EngineDeps,
) -> Result<Vec<Faculty>, EngineError> {
    Ok(Faculty::search(query, department, &deps.db_pool).await?)
}
