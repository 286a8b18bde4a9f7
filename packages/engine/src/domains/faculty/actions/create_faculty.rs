//! Create faculty action - admin-authored direct creation, bypassing the
//! proposal queue. The other creation path is proposal approval.

use tracing::info;

use crate::common::EngineError;
use crate::domains::identity::{require_admin, Identity};
use crate::kernel::EngineDeps;

use super::super::models::Faculty;

/// Directly create a ratable faculty entry. Admin only.
///
/// The zero-initialized aggregates match what proposal approval produces;
/// the unique index on the normalized name rejects duplicates born from a
/// race with a concurrent approval.
pub async fn create_faculty(
    admin: Option<&Identity>,
    name: &str,
    department: Option<&str>,
    deps: &EngineDeps,
) -> Result<Faculty, EngineError> {
    let admin = require_admin(admin, &deps.db_pool).await?;

    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::Validation("name cannot be empty".to_string()));
    }

    let normalized = Faculty::normalize_name(name);
    if normalized.is_empty() {
        return Err(EngineError::Validation(format!(
            "\"{name}\" does not contain a usable name"
        )));
    }

    let mut tx = deps.db_pool.begin().await?;
    if Faculty::find_by_normalized_name(&normalized, &mut tx)
        .await?
        .is_some()
    {
        return Err(EngineError::DuplicateEntity(normalized));
    }
    let faculty = Faculty::insert_new(name, department, None, &mut tx).await?;
    tx.commit().await?;

    info!("Faculty {} created directly by {}", faculty.id, admin.email);

    Ok(faculty)
}
