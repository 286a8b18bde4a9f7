use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{EngineError, ProposalId};
use crate::domains::reviews::models::{Aggregates, ClassAverage};
use crate::kernel::db::is_unique_violation;

use super::faculty_id::FacultyId;

/// A ratable entity and its aggregate statistics.
///
/// Aggregate columns (`review_count`, the four means, `class_average`,
/// `overall`, `last_updated`) are written exclusively by the review ledger,
/// inside the same transaction that appends the review.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub normalized_name: String,
    pub department: Option<String>,

    pub review_count: i32,
    pub teaching: f64,
    pub evaluation: f64,
    pub behaviour: f64,
    pub internals: f64,
    /// 'low', 'medium', 'high'
    pub class_average: String,
    /// Stored weighted score (see `domains::rankings::score`).
    pub overall: f64,

    pub created_from_proposal_id: Option<ProposalId>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Faculty {
    /// Canonicalize a display name into the uniqueness key: lowercase,
    /// punctuation stripped, whitespace collapsed. Two names normalizing to
    /// the same key are the same entity.
    pub fn normalize_name(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Typed view of the categorical aggregate column.
    pub fn class_average(&self) -> ClassAverage {
        self.class_average.parse().unwrap_or(ClassAverage::Medium)
    }

    // =========================================================================
    // SQL queries - ALL queries for faculties live here
    // =========================================================================

    /// Insert a zero-initialized faculty inside the caller's transaction.
    ///
    /// The unique index on `normalized_name` backs the duplicate pre-checks
    /// the callers perform; a collision that slips past them still maps to
    /// `DuplicateEntity` here.
    pub async fn insert_new(
        name: &str,
        department: Option<&str>,
        created_from_proposal_id: Option<ProposalId>,
        conn: &mut PgConnection,
    ) -> Result<Self, EngineError> {
        let normalized = Self::normalize_name(name);
        let id = FacultyId::generate(name);

        let faculty = sqlx::query_as::<_, Faculty>(
            r#"
            INSERT INTO faculties (id, name, normalized_name, department, created_from_proposal_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(&normalized)
        .bind(department)
        .bind(created_from_proposal_id)
        .fetch_one(conn)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                EngineError::DuplicateEntity(normalized.clone())
            } else {
                EngineError::Database(err)
            }
        })?;

        Ok(faculty)
    }

    pub async fn find_by_id(id: &FacultyId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Faculty>("SELECT * FROM faculties WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Transactional read with a row lock, used by the write paths so that
    /// concurrent writers against the same faculty serialize.
    pub async fn find_by_id_for_update(
        id: &FacultyId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Faculty>("SELECT * FROM faculties WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_normalized_name(
        normalized_name: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Faculty>("SELECT * FROM faculties WHERE normalized_name = $1")
            .bind(normalized_name)
            .fetch_optional(conn)
            .await
    }

    /// The full catalog, alphabetical. Reads last-committed state only.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Faculty>("SELECT * FROM faculties ORDER BY name, id")
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on the display name, optionally
    /// filtered by department. The query is matched literally; `%`, `_`
    /// and `\` carry no wildcard meaning. Reads last-committed state only.
    pub async fn search(
        query: &str,
        department: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        sqlx::query_as::<_, Faculty>(
            r#"
            SELECT * FROM faculties
            WHERE name ILIKE '%' || $1 || '%' ESCAPE '\'
              AND ($2::text IS NULL OR lower(department) = lower($2))
            ORDER BY name, id
            "#,
        )
        .bind(pattern)
        .bind(department)
        .fetch_all(pool)
        .await
    }

    /// Top-n by stored weighted score; ties broken by id for determinism.
    pub async fn rank_top(n: i64, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Faculty>(
            "SELECT * FROM faculties ORDER BY overall DESC, id ASC LIMIT $1",
        )
        .bind(n)
        .fetch_all(pool)
        .await
    }

    /// Write recomputed aggregates inside the ledger's transaction.
    pub async fn apply_aggregates(
        id: &FacultyId,
        aggregates: &Aggregates,
        overall: f64,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE faculties
            SET review_count = $2,
                teaching = $3,
                evaluation = $4,
                behaviour = $5,
                internals = $6,
                class_average = $7,
                overall = $8,
                last_updated = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(aggregates.review_count)
        .bind(aggregates.teaching)
        .bind(aggregates.evaluation)
        .bind(aggregates.behaviour)
        .bind(aggregates.internals)
        .bind(aggregates.class_average.to_string())
        .bind(overall)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_punctuation_and_case() {
        assert_eq!(Faculty::normalize_name("Dr. A  B"), "dr a b");
        assert_eq!(
            Faculty::normalize_name("Dr. A  B"),
            Faculty::normalize_name("dr a b")
        );
    }

    #[test]
    fn normalization_collapses_interior_whitespace() {
        assert_eq!(Faculty::normalize_name("  Jane\t  van   Dyke "), "jane van dyke");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = Faculty::normalize_name("Prof. O'Brien-Smith");
        assert_eq!(Faculty::normalize_name(&once), once);
    }
}
