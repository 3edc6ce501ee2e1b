//! Assignment creation route.
//!
//! Provides an endpoint for creating a new assignment in a section:
//! - `POST /api/assignments`
//!
//! Key points:
//! - Only the owning instructor of the section's course (or an admin) may
//!   create assignments.
//! - Questions are validated and normalized up front; the assignment's
//!   `total_points` is computed from them unless the payload overrides it.
//! - Assignments are created unpublished.

use crate::auth::claims::AuthUser;
use crate::auth::guards::is_owner;
use crate::response::ApiResponse;
use crate::routes::assignments::common::{AssignmentRequest, AssignmentResponse};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use db::models::{assignment, course, section};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use util::question_bank::validate_questions;
use util::state::AppState;

/// POST /api/assignments
///
/// Create a new assignment in a section. The section's course determines the
/// owning instructor; only that instructor (or an admin) may create. The
/// assignment is always created with `is_published = false`.
///
/// ### Request Body (JSON)
/// - `section_id` (`i64`, required): The section the assignment belongs to.
/// - `title` (`string`, required): The assignment title.
/// - `description` (`string`, optional)
/// - `instructions` (`string`, optional)
/// - `due_date` (`string`, optional): RFC 3339 timestamp.
/// - `questions` (`array`, required): At least one question.
/// - `total_points` (`number`, optional): Overrides the sum of question points.
/// - `passing_score_percent` (`number`, optional, default 60)
/// - `allow_late_submission` (`bool`, optional, default false)
/// - `late_penalty_percent` (`number`, optional, default 10)
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "message": "Assignment created successfully",
///   "data": {
///     "id": 1,
///     "section_id": 3,
///     "course_id": 2,
///     "title": "Week 3 Quiz",
///     "total_points": 20.0,
///     "is_published": false
///   }
/// }
/// ```
///
/// - `400 Bad Request` for an invalid due date or an invalid question set.
/// - `403 Forbidden` when the caller does not own the course.
/// - `404 Not Found` for an unknown section.
/// - `500 Internal Server Error` for database failures.
pub async fn create_assignment(
    State(app_state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AssignmentRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let section = match section::Entity::find_by_id(req.section_id).one(db).await {
        Ok(Some(section)) => section,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AssignmentResponse>::error("Section not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch section: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error("Database error")),
            );
        }
    };

    let course = match course::Entity::find_by_id(section.course_id).one(db).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AssignmentResponse>::error("Course not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch course: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error("Database error")),
            );
        }
    };

    if !is_owner(&user, &course) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<AssignmentResponse>::error(
                "Only the course instructor may create assignments",
            )),
        );
    }

    let due_date = match &req.due_date {
        Some(raw) => match DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)) {
            Ok(date) => Some(date),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<AssignmentResponse>::error(
                        "Invalid due_date datetime",
                    )),
                );
            }
        },
        None => None,
    };

    let questions = match validate_questions(req.questions) {
        Ok(questions) => questions,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<AssignmentResponse>::error(e.to_string())),
            );
        }
    };

    let total_points = req.total_points.unwrap_or_else(|| questions.total_points());
    let now = Utc::now();

    let active = assignment::ActiveModel {
        section_id: Set(section.id),
        course_id: Set(course.id),
        instructor_id: Set(course.instructor_id),
        title: Set(req.title),
        description: Set(req.description),
        instructions: Set(req.instructions),
        due_date: Set(due_date),
        questions: Set(questions),
        total_points: Set(total_points),
        passing_score_percent: Set(req.passing_score_percent.unwrap_or(60.0)),
        allow_late_submission: Set(req.allow_late_submission.unwrap_or(false)),
        late_penalty_percent: Set(req.late_penalty_percent.unwrap_or(10.0)),
        is_published: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match active.insert(db).await {
        Ok(model) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AssignmentResponse::from(model),
                "Assignment created successfully",
            )),
        ),
        Err(e) => {
            tracing::error!("Failed to insert assignment: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Assignment could not be inserted",
                )),
            )
        }
    }
}
