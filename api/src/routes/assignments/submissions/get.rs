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
use db::models::{assignment, assignment_submission};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use util::state::AppState;

/// GET /api/assignments/{assignment_id}/submission
///
/// Retrieve the caller's own submission for an assignment.
///
/// ### Responses
///
/// - `200 OK` with the submission record.
/// - `404 Not Found` when the assignment is unknown or the caller has never
///   saved anything for it.
/// - `500 Internal Server Error` for database failures.
pub async fn get_own_submission(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    match assignment::Entity::find_by_id(assignment_id).one(db).await {
        Ok(Some(_)) => {}
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
    }

    match assignment_submission::Model::find_by_assignment_and_student(
        db,
        assignment_id,
        user.id(),
    )
    .await
    {
        Ok(Some(model)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionResponse::from(model),
                "Submission retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<SubmissionResponse>::error(
                "Submission not found",
            )),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch submission: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error("Database error")),
            )
        }
    }
}

/// GET /api/assignments/{assignment_id}/submissions
///
/// List every submission for an assignment, newest `submitted_at` first.
/// Only the owning instructor (or an admin) may list.
///
/// ### Responses
///
/// - `200 OK` with an array of submission records.
/// - `403 Forbidden` when the caller does not own the assignment.
/// - `404 Not Found` for an unknown assignment.
/// - `500 Internal Server Error` for database failures.
pub async fn list_submissions(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let assignment = match assignment::Entity::find_by_id(assignment_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<SubmissionResponse>>::error(
                    "Assignment not found",
                )),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch assignment: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SubmissionResponse>>::error(
                    "Database error",
                )),
            );
        }
    };

    if !is_owner(&user, &assignment) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Vec<SubmissionResponse>>::error(
                "Only the course instructor may list submissions",
            )),
        );
    }

    match assignment_submission::Entity::find()
        .filter(assignment_submission::Column::AssignmentId.eq(assignment_id))
        .order_by_desc(assignment_submission::Column::SubmittedAt)
        .all(db)
        .await
    {
        Ok(models) => {
            let submissions: Vec<SubmissionResponse> =
                models.into_iter().map(SubmissionResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    submissions,
                    "Submissions retrieved successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!("Failed to list submissions: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SubmissionResponse>>::error(
                    "Database error",
                )),
            )
        }
    }
}
