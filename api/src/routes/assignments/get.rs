use crate::response::ApiResponse;
use crate::routes::assignments::common::AssignmentResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::assignment;
use sea_orm::EntityTrait;
use util::state::AppState;

/// GET /api/assignments/{assignment_id}
///
/// Retrieve a specific assignment. Any authenticated user may read
/// assignment metadata; enrollment is only checked when submitting.
///
/// ### Path Parameters
/// - `assignment_id` (i64): The ID of the assignment to retrieve
///
/// ### Responses
///
/// - `200 OK` with the assignment record.
/// - `404 Not Found`
/// ```json
/// {
///   "success": false,
///   "message": "Assignment not found"
/// }
/// ```
/// - `500 Internal Server Error` for database failures.
pub async fn get_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match assignment::Entity::find_by_id(assignment_id).one(db).await {
        Ok(Some(model)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AssignmentResponse::from(model),
                "Assignment retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<AssignmentResponse>::error(
                "Assignment not found",
            )),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch assignment: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error("Database error")),
            )
        }
    }
}
