use crate::response::ApiResponse;
use crate::routes::assignments::common::AssignmentResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{assignment, section};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use util::state::AppState;

/// GET /api/sections/{section_id}/assignments
///
/// List the assignments in a section, newest first. Any authenticated user
/// may read the listing.
///
/// ### Path Parameters
/// - `section_id` (i64): The ID of the section
///
/// ### Responses
///
/// - `200 OK` with an array of assignment records.
/// - `404 Not Found` for an unknown section.
/// - `500 Internal Server Error` for database failures.
pub async fn list_section_assignments(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match section::Entity::find_by_id(section_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<AssignmentResponse>>::error(
                    "Section not found",
                )),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch section: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AssignmentResponse>>::error(
                    "Database error",
                )),
            );
        }
    }

    match assignment::Entity::find()
        .filter(assignment::Column::SectionId.eq(section_id))
        .order_by_desc(assignment::Column::CreatedAt)
        .all(db)
        .await
    {
        Ok(models) => {
            let assignments: Vec<AssignmentResponse> =
                models.into_iter().map(AssignmentResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    assignments,
                    "Assignments retrieved successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!("Failed to list assignments: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AssignmentResponse>>::error(
                    "Database error",
                )),
            )
        }
    }
}
