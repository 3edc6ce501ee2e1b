#![allow(dead_code)]
//! Shared setup for the integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations
//! applied, a router built the same way `main` builds it, and a set of
//! seeded users with ready-made bearer tokens.

use api::auth::generate_jwt;
use api::routes::routes;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use db::models::{
    course::Model as CourseModel,
    enrollment::Model as EnrollmentModel,
    section::Model as SectionModel,
    user::{Model as UserModel, Role},
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;
use util::config::AppConfig;
use util::state::AppState;

pub struct TestContext {
    pub app: Router,
    pub db: DatabaseConnection,
    pub instructor: UserModel,
    pub student: UserModel,
    pub outsider: UserModel,
    pub admin: UserModel,
    pub instructor_token: String,
    pub student_token: String,
    pub outsider_token: String,
    pub admin_token: String,
    pub course: CourseModel,
    pub section: SectionModel,
}

/// Seeds one course with one section, an owning instructor, an enrolled
/// student, an unenrolled user, and an admin.
pub async fn setup() -> TestContext {
    AppConfig::set_jwt_secret("integration-test-secret");

    let db = db::test_utils::setup_test_db().await;

    let instructor = UserModel::create(&db, "instructor", "instructor@test.com", Role::Instructor)
        .await
        .unwrap();
    let student = UserModel::create(&db, "student", "student@test.com", Role::Student)
        .await
        .unwrap();
    let outsider = UserModel::create(&db, "outsider", "outsider@test.com", Role::Student)
        .await
        .unwrap();
    let admin = UserModel::create(&db, "admin", "admin@test.com", Role::Admin)
        .await
        .unwrap();

    let course = CourseModel::create(&db, instructor.id, "Intro to Testing", None)
        .await
        .unwrap();
    let section = SectionModel::create(&db, course.id, "Week 1", 1).await.unwrap();

    EnrollmentModel::enroll(&db, course.id, student.id).await.unwrap();

    let (instructor_token, _) = generate_jwt(instructor.id, instructor.role);
    let (student_token, _) = generate_jwt(student.id, student.role);
    let (outsider_token, _) = generate_jwt(outsider.id, outsider.role);
    let (admin_token, _) = generate_jwt(admin.id, admin.role);

    let app = routes(AppState::new(db.clone()));

    TestContext {
        app,
        db,
        instructor,
        student,
        outsider,
        admin,
        instructor_token,
        student_token,
        outsider_token,
        admin_token,
        course,
        section,
    }
}

/// Sends an authenticated request and returns the status plus parsed body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// A valid two-question payload: one auto-gradable MCQ and one essay.
pub fn mixed_questions() -> Value {
    json!([
        {
            "type": "multiple-choice",
            "prompt": "Capital of France?",
            "options": [
                { "text": "Paris", "is_correct": true },
                { "text": "Lyon", "is_correct": false }
            ]
        },
        {
            "type": "essay",
            "prompt": "Explain your reasoning.",
            "points": 15.0
        }
    ])
}

/// Two multiple-choice questions worth 10 points each.
pub fn mcq_only_questions() -> Value {
    json!([
        {
            "type": "multiple-choice",
            "prompt": "Capital of France?",
            "options": [
                { "text": "Paris", "is_correct": true },
                { "text": "Lyon", "is_correct": false }
            ]
        },
        {
            "type": "multiple-choice",
            "prompt": "The answer to everything?",
            "options": [
                { "text": "42", "is_correct": true },
                { "text": "7", "is_correct": false }
            ]
        }
    ])
}

/// Creates an assignment through the API and returns its JSON record.
pub async fn create_assignment(ctx: &TestContext, questions: Value) -> Value {
    let (status, body) = send(
        &ctx.app,
        "POST",
        "/assignments",
        &ctx.instructor_token,
        Some(json!({
            "section_id": ctx.section.id,
            "title": "Week 1 Quiz",
            "questions": questions
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "seeding assignment failed: {body}");
    body["data"].clone()
}
