//! Integration tests for per-course assignment statistics.

mod helpers;

use axum::http::StatusCode;
use db::models::{enrollment::Model as EnrollmentModel, user::{Model as UserModel, Role}};
use helpers::{create_assignment, mcq_only_questions, mixed_questions, send, setup};
use serde_json::json;

#[tokio::test]
async fn unknown_course_is_not_found_and_non_owner_is_forbidden() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        "GET",
        "/courses/9999/assignment-stats",
        &ctx.instructor_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/courses/{}/assignment-stats", ctx.course.id),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn assignment_without_submissions_yields_an_all_zero_row() {
    let ctx = setup().await;
    create_assignment(&ctx, mixed_questions()).await;

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/courses/{}/assignment-stats", ctx.course.id),
        &ctx.instructor_token,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Week 1 Quiz");
    assert_eq!(rows[0]["total_students"], 1);
    assert_eq!(rows[0]["submissions"], 0);
    assert_eq!(rows[0]["graded"], 0);
    assert_eq!(rows[0]["pending"], 0);
    assert_eq!(rows[0]["average_score"], 0.0);
    assert_eq!(rows[0]["passing_rate"], 0.0);
}

#[tokio::test]
async fn stats_aggregate_graded_and_pending_submissions() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mcq_only_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    // Enroll a second and third student alongside the seeded one.
    let second = UserModel::create(&ctx.db, "student2", "student2@test.com", Role::Student)
        .await
        .unwrap();
    let third = UserModel::create(&ctx.db, "student3", "student3@test.com", Role::Student)
        .await
        .unwrap();
    EnrollmentModel::enroll(&ctx.db, ctx.course.id, second.id).await.unwrap();
    EnrollmentModel::enroll(&ctx.db, ctx.course.id, third.id).await.unwrap();
    let (second_token, _) = api::auth::generate_jwt(second.id, second.role);
    let (third_token, _) = api::auth::generate_jwt(third.id, third.role);

    // Student one scores 100%, student two scores 50%, student three only
    // drafts.
    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [
                { "question_id": 1, "type": "multiple-choice", "selected": "Paris" },
                { "question_id": 2, "type": "multiple-choice", "selected": "42" }
            ],
            "is_submit": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &second_token,
        Some(json!({
            "answers": [
                { "question_id": 1, "type": "multiple-choice", "selected": "Paris" },
                { "question_id": 2, "type": "multiple-choice", "selected": "7" }
            ],
            "is_submit": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &third_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": "Lyon" }],
            "is_submit": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/courses/{}/assignment-stats", ctx.course.id),
        &ctx.instructor_token,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total_students"], 3);
    assert_eq!(rows[0]["submissions"], 3);
    assert_eq!(rows[0]["graded"], 2);
    assert_eq!(rows[0]["pending"], 0);
    assert_eq!(rows[0]["average_score"], 75.0);
    // 50% sits below the default passing score of 60, so only one of the
    // two graded records passes.
    assert_eq!(rows[0]["passing_rate"], 50.0);
}

#[tokio::test]
async fn pending_counts_submissions_awaiting_manual_grading() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [
                { "question_id": 1, "type": "multiple-choice", "selected": "Paris" },
                { "question_id": 2, "type": "essay", "text": "Because." }
            ],
            "is_submit": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/courses/{}/assignment-stats", ctx.course.id),
        &ctx.instructor_token,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows[0]["submissions"], 1);
    assert_eq!(rows[0]["graded"], 0);
    assert_eq!(rows[0]["pending"], 1);

    // Admins bypass ownership for statistics too.
    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/courses/{}/assignment-stats", ctx.course.id),
        &ctx.admin_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
