//! Submission save/finalize route.
//!
//! - `POST /api/assignments/{assignment_id}/submit`
//!
//! One endpoint covers both draft saves (`is_submit = false`) and
//! finalization (`is_submit = true`). The record is created lazily on the
//! first save; a concurrent first save loses the insert race on the unique
//! (assignment, student) index and falls back to updating the existing row.

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::assignments::common::{SubmissionResponse, SubmitRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use db::models::{
    assignment, assignment_submission,
    assignment_submission::{SubmissionEvent, SubmissionStatus},
    enrollment,
};
use grader::{auto_grade, is_late, percentage};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel, SqlErr, TransactionTrait,
};
use util::question_bank::validate_answers;
use util::state::AppState;

/// POST /api/assignments/{assignment_id}/submit
///
/// Save or finalize the caller's submission for an assignment. Answers are
/// always overwritten wholesale.
///
/// ### Request Body (JSON)
/// - `answers` (`array`, required): Tagged answer values, e.g.
///   `{"question_id": 1, "type": "multiple-choice", "selected": "Paris"}`.
/// - `is_submit` (`bool`, required): `false` saves a draft, `true` finalizes.
///
/// On finalize, multiple-choice answers are auto-graded immediately. When
/// every question is auto-gradable the record lands in `graded`; otherwise it
/// waits in `submitted` for manual grading. Lateness is recorded against the
/// assignment's due date but never changes the score.
///
/// ### Responses
///
/// - `200 OK` with the stored record.
/// - `400 Bad Request` when an answer references an unknown question, has the
///   wrong shape for its question's type, or duplicates another answer.
/// - `403 Forbidden` when the caller is not enrolled in the course.
/// - `404 Not Found` for an unknown assignment.
/// - `409 Conflict` for an illegal lifecycle transition, e.g.
/// ```json
/// {
///   "success": false,
///   "message": "cannot save a draft of a graded submission"
/// }
/// ```
/// - `500 Internal Server Error` for database failures.
pub async fn submit_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    user: AuthUser,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let assignment = match assignment::Entity::find_by_id(assignment_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Assignment not found",
                )),
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

    match enrollment::Model::is_enrolled(db, assignment.course_id, user.id()).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "You are not enrolled in this course",
                )),
            );
        }
        Err(e) => {
            tracing::error!("Failed to check enrollment: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            );
        }
    }

    let mut answers = match validate_answers(&assignment.questions, req.answers) {
        Ok(answers) => answers,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<SubmissionResponse>::error(e.to_string())),
            );
        }
    };

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

    let now = Utc::now();

    let existing = match assignment_submission::Model::find_by_assignment_and_student(
        &txn,
        assignment.id,
        user.id(),
    )
    .await
    {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Failed to fetch submission: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            );
        }
    };

    let record = match existing {
        Some(record) => record,
        None => {
            let draft = assignment_submission::ActiveModel {
                assignment_id: Set(assignment.id),
                student_id: Set(user.id()),
                course_id: Set(assignment.course_id),
                answers: Set(answers.clone()),
                status: Set(SubmissionStatus::Draft),
                total_points_earned: Set(0.0),
                max_points: Set(assignment.total_points),
                score_percentage: Set(0.0),
                feedback: Set(None),
                is_late_submission: Set(false),
                submitted_at: Set(None),
                graded_at: Set(None),
                graded_by: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            match draft.insert(&txn).await {
                Ok(model) => model,
                // Lost the first-save race: another request inserted the row
                // between our read and our insert. Fall back to that row.
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    match assignment_submission::Model::find_by_assignment_and_student(
                        &txn,
                        assignment.id,
                        user.id(),
                    )
                    .await
                    {
                        Ok(Some(model)) => model,
                        Ok(None) | Err(_) => {
                            tracing::error!(
                                "Submission row vanished after unique violation fallback"
                            );
                            return (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to insert submission: {e}");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<SubmissionResponse>::error("Database error")),
                    );
                }
            }
        }
    };

    let event = if req.is_submit {
        SubmissionEvent::Finalize {
            all_auto: assignment.questions.all_auto_gradable(),
            manually_graded: record.manually_graded(),
        }
    } else {
        SubmissionEvent::SaveDraft
    };

    let next_status = match record.status.transition(event) {
        Ok(status) => status,
        Err(e) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<SubmissionResponse>::error(e.to_string())),
            );
        }
    };

    let max_points = record.max_points;
    let mut active = record.into_active_model();

    if req.is_submit {
        let earned = auto_grade(&assignment.questions, &mut answers);
        active.total_points_earned = Set(earned);
        active.score_percentage = Set(percentage(earned, max_points));
        active.is_late_submission = Set(is_late(now, assignment.due_date));
        active.submitted_at = Set(Some(now));
    }
    active.answers = Set(answers);
    active.status = Set(next_status);
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
        tracing::error!("Failed to commit submission: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionResponse>::error("Database error")),
        );
    }

    let message = match updated.status {
        SubmissionStatus::Draft => "Draft saved successfully",
        SubmissionStatus::Graded => "Submission received and auto-graded",
        _ => "Submission received and pending manual grading",
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(SubmissionResponse::from(updated), message)),
    )
}
