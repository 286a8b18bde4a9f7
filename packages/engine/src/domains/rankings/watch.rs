//! Optional subscription interface: a cancellable stream of faculty
//! snapshots, layered on the query path.
//!
//! Events are refresh hints, not deltas: every event triggers a re-read of
//! committed state, so a lagged or dropped event only delays a snapshot.
//! Dropping the stream cancels the subscription.

use futures::Stream;
use futures::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::domains::faculty::models::{Faculty, FacultyId};
use crate::domains::reviews::actions::submit_review::faculty_topic;
use crate::kernel::EngineDeps;

/// Subscribe to one faculty's aggregate updates.
///
/// Yields a fresh snapshot after each committed review. Best-effort: no
/// delivery guarantee is made to watchers (reads stay pull-based).
pub async fn watch_faculty(
    faculty_id: FacultyId,
    deps: &EngineDeps,
) -> impl Stream<Item = Faculty> {
    let rx = deps.hub.subscribe(&faculty_topic(&faculty_id)).await;
    let pool = deps.db_pool.clone();

    BroadcastStream::new(rx).filter_map(move |event| {
        let pool = pool.clone();
        let faculty_id = faculty_id.clone();
        async move {
            // A lagged receiver skips ahead; the next snapshot catches up
            event.ok()?;
            Faculty::find_by_id(&faculty_id, &pool).await.ok().flatten()
        }
    })
}
