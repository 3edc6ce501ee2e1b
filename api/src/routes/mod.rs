//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain (assignments, sections, submissions,
//! courses, health), each protected via appropriate access control
//! middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/assignments` → Assignment CRUD and the nested submission lifecycle
//!   (authenticated users)
//! - `/sections` → Per-section assignment listings (authenticated users)
//! - `/submissions` → Manual grading of finalized submissions
//!   (authenticated users; ownership enforced per handler)
//! - `/courses` → Per-course assignment statistics (authenticated users;
//!   ownership enforced per handler)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    assignments::assignment_routes, courses::course_routes, health::health_routes,
    sections::section_routes, submissions::submission_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod assignments;
pub mod courses;
pub mod health;
pub mod sections;
pub mod submissions;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router is ready to be nested under `/api` in `main`.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/assignments` → Assignment definition and submission endpoints.
/// - `/sections` → Section-scoped assignment listings.
/// - `/submissions` → Instructor grading endpoints.
/// - `/courses` → Instructor statistics endpoints.
///
/// Everything except `/health` requires a valid bearer token; finer-grained
/// checks (course ownership, enrollment) live in the individual handlers.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest(
            "/assignments",
            assignment_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/sections",
            section_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/submissions",
            submission_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/courses",
            course_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
