//! # Sections Routes Module
//!
//! Defines and wires up routes for the `/api/sections` endpoint group.
//! Section CRUD itself is out of scope here; the group only exposes the
//! per-section assignment listing.

use axum::{Router, routing::get};
use get::list_section_assignments;
use util::state::AppState;

pub mod get;

/// Builds and returns the `/sections` route group.
///
/// Routes:
/// - `GET /sections/{section_id}/assignments` → List a section's assignments,
///   newest first
pub fn section_routes() -> Router<AppState> {
    Router::new().route("/{section_id}/assignments", get(list_section_assignments))
}
