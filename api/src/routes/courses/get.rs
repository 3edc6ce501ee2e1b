//! Course statistics route.
//!
//! - `GET /api/courses/{course_id}/assignment-stats`
//!
//! Read-only aggregation over submission records; nothing here mutates
//! state, so no transaction is needed.

use crate::auth::claims::AuthUser;
use crate::auth::guards::is_owner;
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{
    assignment, assignment_submission, assignment_submission::SubmissionStatus, course, enrollment,
};
use grader::{passed, scorer::round2};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use util::state::AppState;

/// One row of grading statistics for a single assignment.
#[derive(Debug, Serialize)]
pub struct AssignmentStats {
    pub assignment_id: i64,
    pub title: String,
    pub total_students: u64,
    pub submissions: u64,
    pub graded: u64,
    pub pending: u64,
    /// Mean `score_percentage` over graded records, 0.0 when none.
    pub average_score: f64,
    /// Percentage of graded records at or above the passing score, 0.0 when
    /// none are graded.
    pub passing_rate: f64,
}

/// GET /api/courses/{course_id}/assignment-stats
///
/// Per-assignment grading statistics for a course. Only the owning
/// instructor (or an admin) may read them. Assignments with no submissions
/// yield all-zero rows.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "message": "Statistics retrieved successfully",
///   "data": [
///     {
///       "assignment_id": 1,
///       "title": "Week 3 Quiz",
///       "total_students": 30,
///       "submissions": 24,
///       "graded": 20,
///       "pending": 4,
///       "average_score": 71.25,
///       "passing_rate": 85.0
///     }
///   ]
/// }
/// ```
/// - `403 Forbidden` when the caller does not own the course.
/// - `404 Not Found` for an unknown course.
/// - `500 Internal Server Error` for database failures.
pub async fn get_assignment_stats(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let course = match course::Entity::find_by_id(course_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<AssignmentStats>>::error("Course not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch course: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AssignmentStats>>::error("Database error")),
            );
        }
    };

    if !is_owner(&user, &course) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Vec<AssignmentStats>>::error(
                "Only the course instructor may view statistics",
            )),
        );
    }

    let total_students = match enrollment::Model::count_for_course(db, course_id).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count enrollments: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AssignmentStats>>::error("Database error")),
            );
        }
    };

    let assignments = match assignment::Entity::find()
        .filter(assignment::Column::CourseId.eq(course_id))
        .order_by_asc(assignment::Column::CreatedAt)
        .all(db)
        .await
    {
        Ok(models) => models,
        Err(e) => {
            tracing::error!("Failed to list assignments: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AssignmentStats>>::error("Database error")),
            );
        }
    };

    let mut stats = Vec::with_capacity(assignments.len());
    for a in assignments {
        let submissions = match assignment_submission::Entity::find()
            .filter(assignment_submission::Column::AssignmentId.eq(a.id))
            .all(db)
            .await
        {
            Ok(models) => models,
            Err(e) => {
                tracing::error!("Failed to list submissions: {e}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<AssignmentStats>>::error("Database error")),
                );
            }
        };

        let graded: Vec<_> = submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Graded)
            .collect();
        let pending = submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Submitted)
            .count() as u64;

        let (average_score, passing_rate) = if graded.is_empty() {
            (0.0, 0.0)
        } else {
            let sum: f64 = graded.iter().map(|s| s.score_percentage).sum();
            let passing = graded
                .iter()
                .filter(|s| passed(s.score_percentage, a.passing_score_percent))
                .count();
            (
                round2(sum / graded.len() as f64),
                round2(passing as f64 / graded.len() as f64 * 100.0),
            )
        };

        stats.push(AssignmentStats {
            assignment_id: a.id,
            title: a.title,
            total_students,
            submissions: submissions.len() as u64,
            graded: graded.len() as u64,
            pending,
            average_score,
            passing_rate,
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            stats,
            "Statistics retrieved successfully",
        )),
    )
}
