//! # Courses Routes Module
//!
//! Defines and wires up routes for the `/api/courses` endpoint group.
//! Course CRUD is out of scope; the group carries the instructor-facing
//! statistics endpoint.

use axum::{Router, routing::get};
use get::get_assignment_stats;
use util::state::AppState;

pub mod get;

/// Builds and returns the `/courses` route group.
///
/// Routes:
/// - `GET /courses/{course_id}/assignment-stats` → Per-assignment grading
///   statistics for a course (owning instructor or admin only)
pub fn course_routes() -> Router<AppState> {
    Router::new().route("/{course_id}/assignment-stats", get(get_assignment_stats))
}
