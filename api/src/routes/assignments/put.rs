//! Assignment edit route.
//!
//! - `PUT /api/assignments/{assignment_id}`
//!
//! Structural edits are blocked once any student submission exists for the
//! assignment; the existence check and the write share one transaction so a
//! submission landing mid-edit cannot slip through.

use crate::auth::claims::AuthUser;
use crate::auth::guards::is_owner;
use crate::response::ApiResponse;
use crate::routes::assignments::common::{AssignmentResponse, AssignmentUpdateRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use db::models::assignment;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel, TransactionTrait};
use util::question_bank::validate_questions;
use util::state::AppState;

/// PUT /api/assignments/{assignment_id}
///
/// Edit an assignment. All body fields are optional; omitted fields keep
/// their current values. When `questions` is supplied it is re-validated and
/// `total_points` is recomputed from it unless the payload carries an
/// explicit `total_points`; a `total_points` without `questions` is rejected
/// so the total cannot drift from the question set.
///
/// ### Responses
///
/// - `200 OK` with the updated record.
/// - `400 Bad Request` for an invalid due date or question set.
/// - `403 Forbidden` when the caller does not own the assignment.
/// - `404 Not Found` for an unknown assignment.
/// - `409 Conflict`
/// ```json
/// {
///   "success": false,
///   "message": "Cannot modify assignment after student submissions exist"
/// }
/// ```
/// - `500 Internal Server Error` for database failures.
pub async fn edit_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    user: AuthUser,
    Json(req): Json<AssignmentUpdateRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => {
            tracing::error!("Failed to open transaction: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error("Database error")),
            );
        }
    };

    let existing = match assignment::Entity::find_by_id(assignment_id).one(&txn).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Assignment not found",
                )),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch assignment: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error("Database error")),
            );
        }
    };

    if !is_owner(&user, &existing) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<AssignmentResponse>::error(
                "Only the course instructor may edit this assignment",
            )),
        );
    }

    match existing.has_submissions(&txn).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Cannot modify assignment after student submissions exist",
                )),
            );
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!("Failed to count submissions: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error("Database error")),
            );
        }
    }

    // A bare total_points patch would detach the total from the question
    // sum; the override is only accepted alongside a re-validated list.
    if req.total_points.is_some() && req.questions.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AssignmentResponse>::error(
                "total_points may only be supplied together with questions",
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

    let mut active = existing.into_active_model();

    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(instructions) = req.instructions {
        active.instructions = Set(Some(instructions));
    }
    if let Some(date) = due_date {
        active.due_date = Set(Some(date));
    }
    if let Some(inputs) = req.questions {
        let questions = match validate_questions(inputs) {
            Ok(questions) => questions,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<AssignmentResponse>::error(e.to_string())),
                );
            }
        };
        let recomputed = questions.total_points();
        active.questions = Set(questions);
        active.total_points = Set(req.total_points.unwrap_or(recomputed));
    }
    if let Some(passing) = req.passing_score_percent {
        active.passing_score_percent = Set(passing);
    }
    if let Some(allow_late) = req.allow_late_submission {
        active.allow_late_submission = Set(allow_late);
    }
    if let Some(penalty) = req.late_penalty_percent {
        active.late_penalty_percent = Set(penalty);
    }
    if let Some(published) = req.is_published {
        active.is_published = Set(published);
    }
    active.updated_at = Set(Utc::now());

    let updated = match active.update(&txn).await {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Failed to update assignment: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Assignment could not be updated",
                )),
            );
        }
    };

    if let Err(e) = txn.commit().await {
        tracing::error!("Failed to commit assignment update: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AssignmentResponse>::error("Database error")),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            AssignmentResponse::from(updated),
            "Assignment updated successfully",
        )),
    )
}
