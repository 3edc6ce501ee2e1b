//! Submission lifecycle routes nested under `/api/assignments/{assignment_id}`.
//!
//! - `post.rs` — draft saves and finalization (`/submit`)
//! - `get.rs` — the caller's own record and the instructor listing
//!
//! The handlers drive the submission state machine in
//! `db::models::assignment_submission`; every mutation runs inside a
//! transaction.

pub mod get;
pub mod post;

pub use get::{get_own_submission, list_submissions};
pub use post::submit_assignment;
