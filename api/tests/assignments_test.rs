//! Integration tests for assignment creation, retrieval, editing, and
//! deletion.

mod helpers;

use axum::http::StatusCode;
use helpers::{create_assignment, mixed_questions, send, setup};
use serde_json::json;

#[tokio::test]
async fn instructor_creates_assignment_with_computed_points() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.instructor_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Week 1 Quiz",
            "questions": mixed_questions()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    // MCQ defaults to 10 points, essay carries 15.
    assert_eq!(body["data"]["total_points"], 25.0);
    assert_eq!(body["data"]["is_published"], false);
    assert_eq!(body["data"]["course_id"], ctx.course.id);
    assert_eq!(body["data"]["instructor_id"], ctx.instructor.id);
    // Question ids are assigned 1-based.
    assert_eq!(body["data"]["questions"][0]["id"], 1);
    assert_eq!(body["data"]["questions"][1]["id"], 2);
}

#[tokio::test]
async fn omitted_policy_fields_get_their_stored_defaults() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.instructor_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Defaults Quiz",
            "questions": mixed_questions()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["passing_score_percent"], 60.0);
    assert_eq!(body["data"]["allow_late_submission"], false);
    assert_eq!(body["data"]["late_penalty_percent"], 10.0);
}

#[tokio::test]
async fn total_points_override_wins_over_question_sum() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.instructor_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Weighted Quiz",
            "questions": mixed_questions(),
            "total_points": 100.0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_points"], 100.0);
}

#[tokio::test]
async fn student_cannot_create_assignment() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.student_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Nope",
            "questions": mixed_questions()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn admin_can_create_assignment_in_any_course() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.admin_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Admin Quiz",
            "questions": mixed_questions()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_question_list_is_rejected() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.instructor_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Empty",
            "questions": []
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn mcq_without_correct_option_is_rejected() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.instructor_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Broken",
            "questions": [{
                "type": "multiple-choice",
                "prompt": "Pick one",
                "options": [
                    { "text": "A", "is_correct": false },
                    { "text": "B", "is_correct": false }
                ]
            }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_in_unknown_section_is_not_found() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.instructor_token,
        Some(json!({
            "section_id": 9999,
            "title": "Lost",
            "questions": mixed_questions()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let ctx = setup().await;

    let (status, _) = send(&ctx.app, "GET", "/assignments/1", "not-a-token", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn students_can_read_assignments_and_section_listings() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}"),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Week 1 Quiz");

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/sections/{}/assignments", ctx.section.id),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_assignment_and_section_return_not_found() {
    let ctx = setup().await;

    let (status, _) = send(&ctx.app, "GET", "/assignments/42", &ctx.student_token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &ctx.app,
        "GET",
        "/sections/42/assignments",
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_can_edit_until_a_submission_exists() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "PUT",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        Some(json!({ "title": "Week 1 Quiz (v2)", "is_published": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Week 1 Quiz (v2)");
    assert_eq!(body["data"]["is_published"], true);

    // A student saves a draft; edits must now be rejected.
    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": "Paris" }],
            "is_submit": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &ctx.app,
        "PUT",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        Some(json!({ "title": "Too late" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Cannot modify assignment after student submissions exist"
    );
}

#[tokio::test]
async fn non_owner_cannot_edit_or_delete() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, _) = send(
        &ctx.app,
        "PUT",
        &format!("/assignments/{id}"),
        &ctx.student_token,
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &ctx.app,
        "DELETE",
        &format!("/assignments/{id}"),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn editing_questions_recomputes_total_points() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "PUT",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        Some(json!({
            "questions": [{
                "type": "short-answer",
                "prompt": "Define idempotence.",
                "points": 5.0
            }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_points"], 5.0);
}

#[tokio::test]
async fn total_points_patch_without_questions_is_rejected() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "PUT",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        Some(json!({ "total_points": 100.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "total_points may only be supplied together with questions"
    );

    // Unchanged record, and the override still works next to questions.
    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_points"], 25.0);

    let (status, body) = send(
        &ctx.app,
        "PUT",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        Some(json!({
            "questions": [{
                "type": "essay",
                "prompt": "Summarize the chapter.",
                "points": 20.0
            }],
            "total_points": 40.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_points"], 40.0);
}

#[tokio::test]
async fn delete_removes_assignment_and_its_submissions() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": "Paris" }],
            "is_submit": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &ctx.app,
        "DELETE",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}"),
        &ctx.instructor_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}/submission"),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
