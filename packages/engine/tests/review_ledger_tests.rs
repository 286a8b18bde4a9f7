//! Integration tests for the review ledger.
//!
//! Every submission appends a review and atomically recomputes the owning
//! faculty's aggregates; reads after a committed submission see exact means
//! over the full review set, never a partial state.

mod common;

use crate::common::{
    outsider, ratings, seeded_faculty, student, uniform_ratings, unique_name, TestHarness,
};
use engine_core::common::EngineError;
use engine_core::domains::faculty::FacultyId;
use engine_core::domains::rankings::get_faculty;
use engine_core::domains::reviews::{submit_review, ClassAverage};
use test_context::test_context;

// =============================================================================
// Aggregate correctness
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn first_review_sets_exact_aggregates(ctx: &TestHarness) {
    let faculty = seeded_faculty(ctx, &unique_name("Prof First"))
        .await
        .expect("Failed to seed faculty");
    assert_eq!(faculty.review_count, 0);
    assert_eq!(faculty.overall, 0.0);

    submit_review(
        &faculty.id,
        ratings(4.0, 3.0, 5.0, 2.0),
        Some(ClassAverage::High),
        None,
        &ctx.deps,
    )
    .await
    .expect("Failed to submit review");

    let faculty = get_faculty(&faculty.id, &ctx.deps)
        .await
        .expect("Failed to fetch faculty");
    assert_eq!(faculty.review_count, 1);
    assert_eq!(faculty.teaching, 4.0);
    assert_eq!(faculty.evaluation, 3.0);
    assert_eq!(faculty.behaviour, 5.0);
    assert_eq!(faculty.internals, 2.0);
    assert_eq!(faculty.class_average(), ClassAverage::High);
    // 0.35 * 4.0 + 0.35 * 3.0 + 0.20 * 2.0 + 0.10 * 5.0
    assert!((faculty.overall - 3.35).abs() < 1e-9);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn aggregates_are_means_over_all_reviews(ctx: &TestHarness) {
    let faculty = seeded_faculty(ctx, &unique_name("Prof Means"))
        .await
        .expect("Failed to seed faculty");

    submit_review(
        &faculty.id,
        uniform_ratings(4.0),
        Some(ClassAverage::Low),
        None,
        &ctx.deps,
    )
    .await
    .expect("Failed to submit first review");
    submit_review(
        &faculty.id,
        uniform_ratings(2.0),
        Some(ClassAverage::High),
        None,
        &ctx.deps,
    )
    .await
    .expect("Failed to submit second review");

    let faculty = get_faculty(&faculty.id, &ctx.deps)
        .await
        .expect("Failed to fetch faculty");
    assert_eq!(faculty.review_count, 2);
    assert_eq!(faculty.teaching, 3.0);
    assert_eq!(faculty.evaluation, 3.0);
    assert_eq!(faculty.behaviour, 3.0);
    assert_eq!(faculty.internals, 3.0);
    // Low (1) and High (3) average to the Medium band
    assert_eq!(faculty.class_average(), ClassAverage::Medium);
    assert!((faculty.overall - 3.0).abs() < 1e-9);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn missing_class_average_counts_as_medium(ctx: &TestHarness) {
    let faculty = seeded_faculty(ctx, &unique_name("Prof NoAverage"))
        .await
        .expect("Failed to seed faculty");

    submit_review(&faculty.id, uniform_ratings(3.0), None, None, &ctx.deps)
        .await
        .expect("Failed to submit review");
    submit_review(
        &faculty.id,
        uniform_ratings(3.0),
        Some(ClassAverage::High),
        None,
        &ctx.deps,
    )
    .await
    .expect("Failed to submit review");

    // Medium (2) and High (3) average to 2.5, which lands in the High band
    let faculty = get_faculty(&faculty.id, &ctx.deps)
        .await
        .expect("Failed to fetch faculty");
    assert_eq!(faculty.class_average(), ClassAverage::High);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_submissions_lose_no_review(ctx: &TestHarness) {
    let faculty = seeded_faculty(ctx, &unique_name("Prof Contended"))
        .await
        .expect("Failed to seed faculty");

    let mut handles = Vec::new();
    for i in 0..8u32 {
        let deps = ctx.deps.clone();
        let faculty_id = faculty.id.clone();
        handles.push(tokio::spawn(async move {
            submit_review(
                &faculty_id,
                uniform_ratings(f64::from(i % 5)),
                None,
                None,
                &deps,
            )
            .await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("Submission task panicked")
            .expect("Concurrent submission failed");
    }

    let faculty = get_faculty(&faculty.id, &ctx.deps)
        .await
        .expect("Failed to fetch faculty");
    assert_eq!(faculty.review_count, 8);
    // Mean of 0,1,2,3,4,0,1,2
    assert!((faculty.teaching - 13.0 / 8.0).abs() < 1e-9);
}

// =============================================================================
// Validation and errors
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn review_for_unknown_faculty_is_not_found(ctx: &TestHarness) {
    let ghost = FacultyId::from("no-such-faculty-1234".to_string());
    let result = submit_review(&ghost, uniform_ratings(3.0), None, None, &ctx.deps).await;
    assert!(matches!(result, Err(EngineError::NotFound { .. })));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn out_of_range_rating_writes_nothing(ctx: &TestHarness) {
    let faculty = seeded_faculty(ctx, &unique_name("Prof Strict"))
        .await
        .expect("Failed to seed faculty");

    for bad in [ratings(6.0, 3.0, 3.0, 3.0), ratings(3.0, -0.1, 3.0, 3.0)] {
        let result = submit_review(&faculty.id, bad, None, None, &ctx.deps).await;
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }
    let result = submit_review(
        &faculty.id,
        ratings(f64::NAN, 3.0, 3.0, 3.0),
        None,
        None,
        &ctx.deps,
    )
    .await;
    assert!(matches!(result, Err(EngineError::Validation(_))));

    let faculty = get_faculty(&faculty.id, &ctx.deps)
        .await
        .expect("Failed to fetch faculty");
    assert_eq!(faculty.review_count, 0);
}

// =============================================================================
// Attribution
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn submitter_attribution_is_optional(ctx: &TestHarness) {
    let faculty = seeded_faculty(ctx, &unique_name("Prof Attributed"))
        .await
        .expect("Failed to seed faculty");

    let anonymous = submit_review(&faculty.id, uniform_ratings(3.0), None, None, &ctx.deps)
        .await
        .expect("Failed to submit anonymous review");
    assert!(anonymous.submitted_by_id.is_none());
    assert!(anonymous.submitted_by_email.is_none());

    let submitter = student(ctx);
    let attributed = submit_review(
        &faculty.id,
        uniform_ratings(4.0),
        None,
        Some(&submitter),
        &ctx.deps,
    )
    .await
    .expect("Failed to submit attributed review");
    assert_eq!(attributed.submitted_by_id, Some(submitter.id));
    assert_eq!(attributed.submitted_by_email.as_deref(), Some(submitter.email.as_str()));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn off_campus_submitters_may_still_review(ctx: &TestHarness) {
    let faculty = seeded_faculty(ctx, &unique_name("Prof Open"))
        .await
        .expect("Failed to seed faculty");

    // Reviews have no domain gate; only the identity record matters
    let submitter = outsider(ctx);
    let review = submit_review(
        &faculty.id,
        uniform_ratings(2.0),
        None,
        Some(&submitter),
        &ctx.deps,
    )
    .await
    .expect("Failed to submit review");
    assert_eq!(review.submitted_by_id, Some(submitter.id));
}
