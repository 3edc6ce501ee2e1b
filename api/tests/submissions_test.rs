//! Integration tests for the submission lifecycle: draft saves,
//! finalization, auto-grading, and the instructor listing.

mod helpers;

use axum::http::StatusCode;
use helpers::{create_assignment, mcq_only_questions, mixed_questions, send, setup};
use serde_json::json;

#[tokio::test]
async fn draft_save_keeps_status_draft_and_score_zero() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
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
    assert_eq!(body["data"]["status"], "draft");
    assert_eq!(body["data"]["total_points_earned"], 0.0);
    assert_eq!(body["data"]["score_percentage"], 0.0);
    assert_eq!(body["data"]["submitted_at"], serde_json::Value::Null);
    // The denominator is frozen at creation time.
    assert_eq!(body["data"]["max_points"], 25.0);
}

#[tokio::test]
async fn redrafting_overwrites_answers_wholesale() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    for selected in ["Lyon", "Paris"] {
        let (status, _) = send(
            &ctx.app,
            "POST",
            &format!("/assignments/{id}/submit"),
            &ctx.student_token,
            Some(json!({
                "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": selected }],
                "is_submit": false
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}/submission"),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let answers = body["data"]["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["value"]["selected"], "Paris");
}

#[tokio::test]
async fn finalizing_all_mcq_assignment_auto_grades_to_graded() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mcq_only_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
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
    assert_eq!(body["data"]["status"], "graded");
    assert_eq!(body["data"]["total_points_earned"], 10.0);
    assert_eq!(body["data"]["max_points"], 20.0);
    assert_eq!(body["data"]["score_percentage"], 50.0);
    assert!(body["data"]["submitted_at"].is_string());

    let answers = body["data"]["answers"].as_array().unwrap();
    assert_eq!(answers[0]["is_correct"], true);
    assert_eq!(answers[0]["points_earned"], 10.0);
    assert_eq!(answers[1]["is_correct"], false);
    assert_eq!(answers[1]["points_earned"], 0.0);
}

#[tokio::test]
async fn finalizing_mixed_assignment_waits_in_submitted() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [
                { "question_id": 1, "type": "multiple-choice", "selected": "Paris" },
                { "question_id": 2, "type": "essay", "text": "Because it is." }
            ],
            "is_submit": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "submitted");
    // The MCQ is scored immediately; the essay waits at zero.
    assert_eq!(body["data"]["total_points_earned"], 10.0);
    assert_eq!(body["data"]["score_percentage"], 40.0);

    let answers = body["data"]["answers"].as_array().unwrap();
    assert_eq!(answers[1]["is_correct"], serde_json::Value::Null);
    assert_eq!(answers[1]["points_earned"], 0.0);
}

#[tokio::test]
async fn unenrolled_user_cannot_submit() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mcq_only_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.outsider_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": "Paris" }],
            "is_submit": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You are not enrolled in this course");
}

#[tokio::test]
async fn answers_are_validated_against_the_question_set() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mixed_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    // Unknown question id.
    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [{ "question_id": 99, "type": "multiple-choice", "selected": "Paris" }],
            "is_submit": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Wrong value shape for the question's type.
    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "essay", "text": "Paris" }],
            "is_submit": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate answers to one question.
    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [
                { "question_id": 1, "type": "multiple-choice", "selected": "Paris" },
                { "question_id": 1, "type": "multiple-choice", "selected": "Lyon" }
            ],
            "is_submit": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn draft_save_after_finalization_is_a_conflict() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mcq_only_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": "Paris" }],
            "is_submit": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": "Lyon" }],
            "is_submit": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "cannot save a draft of a graded submission");
}

#[tokio::test]
async fn refinalizing_rescores_the_record() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mcq_only_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [
                { "question_id": 1, "type": "multiple-choice", "selected": "Lyon" },
                { "question_id": 2, "type": "multiple-choice", "selected": "7" }
            ],
            "is_submit": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score_percentage"], 0.0);

    let (status, body) = send(
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
    assert_eq!(body["data"]["status"], "graded");
    assert_eq!(body["data"]["score_percentage"], 100.0);
}

#[tokio::test]
async fn own_submission_is_fetchable_and_absent_when_never_saved() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mcq_only_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}/submission"),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

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
        "GET",
        &format!("/assignments/{id}/submission"),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student_id"], ctx.student.id);
}

#[tokio::test]
async fn only_the_owner_lists_submissions() {
    let ctx = setup().await;
    let assignment = create_assignment(&ctx, mcq_only_questions()).await;
    let id = assignment["id"].as_i64().unwrap();

    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/assignments/{id}/submit"),
        &ctx.student_token,
        Some(json!({
            "answers": [{ "question_id": 1, "type": "multiple-choice", "selected": "Paris" }],
            "is_submit": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}/submissions"),
        &ctx.student_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}/submissions"),
        &ctx.instructor_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Admins bypass ownership.
    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/assignments/{id}/submissions"),
        &ctx.admin_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
