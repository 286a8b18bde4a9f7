//! Submit review action - the correctness-critical write path.
//!
//! A submission appends one review and recomputes the owning faculty's
//! aggregates from the full review set, as a single serializable
//! transaction. A conflicting concurrent commit aborts the transaction and
//! it is re-run from the top, up to `MAX_TX_ATTEMPTS`.
//!
//! Retrying after an *ambiguous* failure (e.g. a timeout where the commit
//! may have landed) is unsafe and deliberately not done here: a client-side
//! retry can duplicate the review. Only clean `TransactionConflict` results
//! are safe to retry from outside.

use sqlx::{Postgres, Transaction};
use tracing::{debug, info, warn};

use crate::common::EngineError;
use crate::domains::faculty::models::{Faculty, FacultyId};
use crate::domains::identity::Identity;
use crate::domains::rankings::score::overall_score;
use crate::kernel::db::{begin_serializable, is_retryable, MAX_TX_ATTEMPTS};
use crate::kernel::EngineDeps;

use super::super::models::{Aggregates, ClassAverage, RatingSet, Review};

/// Append a review to a faculty and atomically refresh its aggregates.
///
/// Anonymous submissions are allowed; pass `None` for `submitter`. Returns
/// the committed review — treat it as authoritative for this write rather
/// than issuing a follow-up read.
pub async fn submit_review(
    faculty_id: &FacultyId,
    ratings: RatingSet,
    class_average_input: Option<ClassAverage>,
    submitter: Option<&Identity>,
    deps: &EngineDeps,
) -> Result<Review, EngineError> {
    // Fail before any write on malformed input
    ratings.validate()?;

    debug!(
        "Submitting review for faculty {} (submitter: {})",
        faculty_id,
        submitter.map(|s| s.email.as_str()).unwrap_or("anonymous")
    );

    let mut attempts = 0u32;
    let review = loop {
        attempts += 1;
        let mut tx = begin_serializable(&deps.db_pool).await?;

        match submit_in_tx(&mut tx, faculty_id, &ratings, class_average_input, submitter).await {
            Ok(review) => match tx.commit().await {
                Ok(()) => break review,
                Err(err) if is_retryable(&err) => {
                    if attempts >= MAX_TX_ATTEMPTS {
                        return Err(EngineError::TransactionConflict { attempts });
                    }
                    warn!(
                        "Review submission for {} conflicted at commit (attempt {}), retrying",
                        faculty_id, attempts
                    );
                }
                Err(err) => return Err(err.into()),
            },
            Err(EngineError::Database(ref err)) if is_retryable(err) => {
                if attempts >= MAX_TX_ATTEMPTS {
                    return Err(EngineError::TransactionConflict { attempts });
                }
                warn!(
                    "Review submission for {} conflicted (attempt {}), retrying",
                    faculty_id, attempts
                );
            }
            Err(err) => return Err(err),
        }
    };

    info!(
        "Review {} committed for faculty {} after {} attempt(s)",
        review.id, faculty_id, attempts
    );

    // Refresh hint for watchers; outside the transaction on purpose
    deps.hub
        .publish(
            &faculty_topic(faculty_id),
            serde_json::json!({
                "type": "faculty_updated",
                "faculty_id": faculty_id.as_str(),
                "review_id": review.id,
            }),
        )
        .await;

    Ok(review)
}

/// Stream-hub topic for one faculty's update events.
pub fn faculty_topic(faculty_id: &FacultyId) -> String {
    format!("faculty:{faculty_id}")
}

/// One atomic attempt: read faculty and full review set, append, recompute,
/// write back. Both rows commit together or neither does.
async fn submit_in_tx(
    tx: &mut Transaction<'static, Postgres>,
    faculty_id: &FacultyId,
    ratings: &RatingSet,
    class_average_input: Option<ClassAverage>,
    submitter: Option<&Identity>,
) -> Result<Review, EngineError> {
    let faculty = Faculty::find_by_id_for_update(faculty_id, &mut *tx)
        .await?
        .ok_or_else(|| EngineError::not_found("Faculty", faculty_id))?;

    let existing = Review::list_for_faculty(faculty_id, &mut *tx).await?;

    let review = Review::insert(
        faculty_id,
        ratings,
        class_average_input,
        submitter.map(|s| s.id),
        submitter.map(|s| s.email.as_str()),
        &mut *tx,
    )
    .await?;

    let mut rows: Vec<_> = existing.iter().map(Review::rating_row).collect();
    rows.push(review.rating_row());
    let aggregates = Aggregates::compute(&rows);

    Faculty::apply_aggregates(&faculty.id, &aggregates, overall_score(&aggregates), &mut *tx)
        .await?;

    Ok(review)
}
