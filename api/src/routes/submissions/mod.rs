//! # Submissions Routes Module
//!
//! Defines and wires up routes for the `/api/submissions` endpoint group.
//! Submission creation lives under `/api/assignments/{assignment_id}`; this
//! group carries the instructor-facing grading endpoint, which is addressed
//! by submission ID.

use axum::{Router, routing::put};
use put::grade_submission;
use util::state::AppState;

pub mod put;

/// Builds and returns the `/submissions` route group.
///
/// Routes:
/// - `PUT /submissions/{submission_id}/grade` → Manually grade a finalized
///   submission (owning instructor or admin only)
pub fn submission_routes() -> Router<AppState> {
    Router::new().route("/{submission_id}/grade", put(grade_submission))
}
