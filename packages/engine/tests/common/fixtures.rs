//! Shared fixtures for integration tests.
//!
//! Tests run in parallel against one shared database, so every created
//! faculty gets a unique name.

use anyhow::Result;
use uuid::Uuid;

use engine_core::common::IdentityId;
use engine_core::domains::faculty::{actions::create_faculty, Faculty};
use engine_core::domains::identity::{Admin, Identity};
use engine_core::domains::reviews::RatingSet;

use super::harness::{TestHarness, TEST_DOMAIN};

/// A faculty display name no other test will collide with.
pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4().simple())
}

/// A domain-verified campus identity.
pub fn student(harness: &TestHarness) -> Identity {
    let id = IdentityId::new();
    harness
        .deps
        .guard
        .identify(id, &format!("student-{id}@{TEST_DOMAIN}"))
}

/// An identity from outside the campus domain.
pub fn outsider(harness: &TestHarness) -> Identity {
    harness
        .deps
        .guard
        .identify(IdentityId::new(), "someone@example.com")
}

/// A campus identity with a row in the admins table.
pub async fn admin(harness: &TestHarness) -> Result<Identity> {
    let identity = student(harness);
    Admin::grant(identity.id, &identity.email, &harness.db_pool).await?;
    Ok(identity)
}

/// Create a ratable faculty directly (via the admin path), bypassing the
/// proposal workflow.
pub async fn seeded_faculty(harness: &TestHarness, name: &str) -> Result<Faculty> {
    let admin = admin(harness).await?;
    let faculty = create_faculty(Some(&admin), name, None, &harness.deps).await?;
    Ok(faculty)
}

pub fn ratings(teaching: f64, evaluation: f64, behaviour: f64, internals: f64) -> RatingSet {
    RatingSet {
        teaching,
        evaluation,
        behaviour,
        internals,
    }
}

/// All four categories at the same value.
pub fn uniform_ratings(value: f64) -> RatingSet {
    ratings(value, value, value, value)
}
