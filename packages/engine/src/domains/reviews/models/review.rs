use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{IdentityId, ReviewId};
use crate::domains::faculty::models::FacultyId;

use super::aggregates::RatingRow;
use super::class_average::ClassAverage;
use super::rating_set::RatingSet;

/// One rating event, owned by exactly one faculty. Immutable once written;
/// there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub faculty_id: FacultyId,

    pub teaching: f64,
    pub evaluation: f64,
    pub behaviour: f64,
    pub internals: f64,
    /// 'low', 'medium', 'high', or absent
    pub class_average_input: Option<String>,

    /// Absent means anonymous
    pub submitted_by_id: Option<IdentityId>,
    pub submitted_by_email: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn ratings(&self) -> RatingSet {
        RatingSet {
            teaching: self.teaching,
            evaluation: self.evaluation,
            behaviour: self.behaviour,
            internals: self.internals,
        }
    }

    pub fn class_average_input(&self) -> Option<ClassAverage> {
        self.class_average_input.as_deref().and_then(|s| s.parse().ok())
    }

    /// This review's contribution to the aggregate recomputation.
    pub fn rating_row(&self) -> RatingRow {
        RatingRow {
            teaching: self.teaching,
            evaluation: self.evaluation,
            behaviour: self.behaviour,
            internals: self.internals,
            class_average: self.class_average_input(),
        }
    }

    // =========================================================================
    // SQL queries - ALL queries for reviews live here
    // =========================================================================

    /// The full committed review set of one faculty, read inside the
    /// submission transaction.
    pub async fn list_for_faculty(
        faculty_id: &FacultyId,
        conn: &mut PgConnection,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE faculty_id = $1 ORDER BY created_at, id",
        )
        .bind(faculty_id)
        .fetch_all(conn)
        .await
    }

    /// Append a review inside the ledger's transaction. The timestamp is
    /// server-assigned at commit.
    pub async fn insert(
        faculty_id: &FacultyId,
        ratings: &RatingSet,
        class_average_input: Option<ClassAverage>,
        submitted_by_id: Option<IdentityId>,
        submitted_by_email: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews
                (id, faculty_id, teaching, evaluation, behaviour, internals,
                 class_average_input, submitted_by_id, submitted_by_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(ReviewId::new())
        .bind(faculty_id)
        .bind(ratings.teaching)
        .bind(ratings.evaluation)
        .bind(ratings.behaviour)
        .bind(ratings.internals)
        .bind(class_average_input.map(|c| c.to_string()))
        .bind(submitted_by_id)
        .bind(submitted_by_email)
        .fetch_one(conn)
        .await
    }
}
