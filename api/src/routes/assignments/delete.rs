//! Assignment deletion route.
//!
//! - `DELETE /api/assignments/{assignment_id}`
//!
//! Deletes the assignment and every submission that references it inside one
//! transaction, so a half-deleted assignment is never observable.

use crate::auth::claims::AuthUser;
use crate::auth::guards::{Empty, is_owner};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{assignment, assignment_submission};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, TransactionTrait};
use util::state::AppState;

/// DELETE /api/assignments/{assignment_id}
///
/// Delete an assignment together with all of its submissions. Only the
/// owning instructor (or an admin) may delete.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {},
///   "message": "Assignment deleted successfully"
/// }
/// ```
/// - `403 Forbidden` when the caller does not own the assignment.
/// - `404 Not Found` for an unknown assignment.
/// - `500 Internal Server Error` for database failures.
pub async fn delete_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let existing = match assignment::Entity::find_by_id(assignment_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("Assignment not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch assignment: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Database error")),
            );
        }
    };

    if !is_owner(&user, &existing) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Empty>::error(
                "Only the course instructor may delete this assignment",
            )),
        );
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => {
            tracing::error!("Failed to open transaction: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Database error")),
            );
        }
    };

    if let Err(e) = assignment_submission::Entity::delete_many()
        .filter(assignment_submission::Column::AssignmentId.eq(assignment_id))
        .exec(&txn)
        .await
    {
        tracing::error!("Failed to delete submissions: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Database error")),
        );
    }

    if let Err(e) = existing.delete(&txn).await {
        tracing::error!("Failed to delete assignment: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Database error")),
        );
    }

    if let Err(e) = txn.commit().await {
        tracing::error!("Failed to commit assignment deletion: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Database error")),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            Empty,
            "Assignment deleted successfully",
        )),
    )
}
