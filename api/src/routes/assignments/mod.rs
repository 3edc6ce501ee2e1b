//! # Assignments Routes Module
//!
//! Defines and wires up routes for the `/api/assignments` endpoint group.
//!
//! ## Structure
//! - `post.rs` — POST handlers (create assignment)
//! - `get.rs` — GET handlers (fetch a single assignment)
//! - `put.rs` — PUT handlers (edit assignment)
//! - `delete.rs` — DELETE handlers (remove an assignment and its submissions)
//! - `submissions/` — nested submission lifecycle routes
//! - `common.rs` — request/response payloads shared by the handlers
//!
//! ## Usage
//! Call `assignment_routes()` to get a configured `Router` for `/assignments`
//! to be mounted in the main app.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use delete::delete_assignment;
use get::get_assignment;
use post::create_assignment;
use put::edit_assignment;
use submissions::{get_own_submission, list_submissions, submit_assignment};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;
pub mod submissions;

/// Builds and returns the `/assignments` route group.
///
/// Routes:
/// - `POST   /assignments`                               → Create a new assignment (course owner only)
/// - `GET    /assignments/{assignment_id}`               → Get assignment details
/// - `PUT    /assignments/{assignment_id}`               → Edit assignment (owner only, blocked once submissions exist)
/// - `DELETE /assignments/{assignment_id}`               → Delete assignment and its submissions (owner only)
/// - `POST   /assignments/{assignment_id}/submit`        → Save a draft or finalize a submission (enrolled students)
/// - `GET    /assignments/{assignment_id}/submission`    → The caller's own submission
/// - `GET    /assignments/{assignment_id}/submissions`   → All submissions (owner only)
pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/{assignment_id}", get(get_assignment))
        .route("/{assignment_id}", put(edit_assignment))
        .route("/{assignment_id}", delete(delete_assignment))
        .route("/{assignment_id}/submit", post(submit_assignment))
        .route("/{assignment_id}/submission", get(get_own_submission))
        .route("/{assignment_id}/submissions", get(list_submissions))
}
