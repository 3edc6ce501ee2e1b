//! Manual grading route.
//!
//! - `PUT /api/submissions/{submission_id}/grade`
//!
//! Instructors supply per-question points and feedback for subjective
//! answers; auto-graded multiple-choice points are left alone and fold into
//! the recomputed total. The read-modify-write runs in a transaction and the
//! endpoint may be re-invoked to revise a grade.

use crate::auth::claims::AuthUser;
use crate::auth::guards::is_owner;
use crate::response::ApiResponse;
use crate::routes::assignments::common::SubmissionResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use db::models::{
    assignment, assignment_submission, assignment_submission::SubmissionEvent,
};
use grader::{apply_grades, percentage};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel, TransactionTrait};
use serde::Deserialize;
use std::collections::HashMap;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    /// Points per question, clamped into `[0, question.points]`.
    pub grades: HashMap<i64, f64>,
    /// Per-question feedback, keyed the same way as `grades`.
    #[serde(default)]
    pub feedback: HashMap<i64, String>,
    /// Assignment-level feedback stored on the submission record.
    pub overall_feedback: Option<String>,
}

/// PUT /api/submissions/{submission_id}/grade
///
/// Manually grade a finalized submission. Scores are clamped to each
/// question's worth, per-answer feedback and grader identity are stamped, and
/// the submission moves to `graded` with its percentage recomputed over all
/// answers.
///
/// ### Request Body (JSON)
/// - `grades` (`object`, required): Map of question ID to awarded points.
/// - `feedback` (`object`, optional): Map of question ID to feedback text.
/// - `overall_feedback` (`string`, optional)
///
/// ### Responses
///
/// - `200 OK` with the updated submission record.
/// - `400 Bad Request` when a grade references an unknown question.
/// - `403 Forbidden` when the caller does not own the assignment.
/// - `404 Not Found` for an unknown submission.
/// - `409 Conflict` when the submission is still a draft:
/// ```json
/// {
///   "success": false,
///   "message": "cannot grade a draft submission"
/// }
/// ```
/// - `500 Internal Server Error` for database failures.
pub async fn grade_submission(
    State(app_state): State<AppState>,
    Path(submission_id): Path<i64>,
    user: AuthUser,
    Json(req): Json<GradeRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => {
            tracing::error!("Failed to open transaction: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            );
        }
    };

    let submission = match assignment_submission::Entity::find_by_id(submission_id)
        .one(&txn)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Submission not found",
                )),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch submission: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            );
        }
    };

    let assignment = match assignment::Entity::find_by_id(submission.assignment_id)
        .one(&txn)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            tracing::error!(
                "Submission {} references missing assignment {}",
                submission.id,
                submission.assignment_id
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch assignment: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            );
        }
    };

    if !is_owner(&user, &assignment) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<SubmissionResponse>::error(
                "Only the course instructor may grade submissions",
            )),
        );
    }

    let next_status = match submission.status.transition(SubmissionEvent::ManualGrade) {
        Ok(status) => status,
        Err(e) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<SubmissionResponse>::error(e.to_string())),
            );
        }
    };

    let now = Utc::now();
    let mut answers = submission.answers.clone();

    let earned = match apply_grades(
        &assignment.questions,
        &mut answers,
        &req.grades,
        &req.feedback,
        user.id(),
        now,
    ) {
        Ok(earned) => earned,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<SubmissionResponse>::error(e.to_string())),
            );
        }
    };

    let max_points = submission.max_points;
    let mut active = submission.into_active_model();
    active.answers = Set(answers);
    active.status = Set(next_status);
    active.total_points_earned = Set(earned);
    active.score_percentage = Set(percentage(earned, max_points));
    active.graded_at = Set(Some(now));
    active.graded_by = Set(Some(user.id()));
    if let Some(feedback) = req.overall_feedback {
        active.feedback = Set(Some(feedback));
    }
    active.updated_at = Set(now);

    let updated = match active.update(&txn).await {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Failed to update submission: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            );
        }
    };

    if let Err(e) = txn.commit().await {
        tracing::error!("Failed to commit grade: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionResponse>::error("Database error")),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            SubmissionResponse::from(updated),
            "Submission graded successfully",
        )),
    )
}
