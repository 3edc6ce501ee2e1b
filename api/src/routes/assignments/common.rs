//! Assignment and submission request/response models.
//!
//! Provides data structures for:
//! - Assignment creation and editing (`AssignmentRequest`, `AssignmentUpdateRequest`).
//! - Assignment responses (`AssignmentResponse`).
//! - Submission payloads and responses (`SubmitRequest`, `SubmissionResponse`).
//!
//! Includes `From` implementations to convert database models into
//! API-friendly responses.

use serde::{Deserialize, Serialize};
use util::question_bank::{AnswerInput, AnswerList, QuestionInput, QuestionList};

#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub section_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    /// RFC 3339 timestamp, optional.
    pub due_date: Option<String>,
    pub questions: Vec<QuestionInput>,
    /// Explicit override; when omitted the sum of question points is used.
    pub total_points: Option<f64>,
    pub passing_score_percent: Option<f64>,
    pub allow_late_submission: Option<bool>,
    pub late_penalty_percent: Option<f64>,
}

/// Patch payload for `PUT /assignments/{assignment_id}`. Every field is
/// optional; omitted fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct AssignmentUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub due_date: Option<String>,
    pub questions: Option<Vec<QuestionInput>>,
    pub total_points: Option<f64>,
    pub passing_score_percent: Option<f64>,
    pub allow_late_submission: Option<bool>,
    pub late_penalty_percent: Option<f64>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Default, Serialize)]
pub struct AssignmentResponse {
    pub id: i64,
    pub section_id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub due_date: Option<String>,
    pub questions: QuestionList,
    pub total_points: f64,
    pub passing_score_percent: f64,
    pub allow_late_submission: bool,
    pub late_penalty_percent: f64,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::models::assignment::Model> for AssignmentResponse {
    fn from(assignment: db::models::assignment::Model) -> Self {
        Self {
            id: assignment.id,
            section_id: assignment.section_id,
            course_id: assignment.course_id,
            instructor_id: assignment.instructor_id,
            title: assignment.title,
            description: assignment.description,
            instructions: assignment.instructions,
            due_date: assignment.due_date.map(|d| d.to_rfc3339()),
            questions: assignment.questions,
            total_points: assignment.total_points,
            passing_score_percent: assignment.passing_score_percent,
            allow_late_submission: assignment.allow_late_submission,
            late_penalty_percent: assignment.late_penalty_percent,
            is_published: assignment.is_published,
            created_at: assignment.created_at.to_rfc3339(),
            updated_at: assignment.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerInput>,
    /// `false` saves a draft, `true` finalizes the submission.
    pub is_submit: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub status: String,
    pub answers: AnswerList,
    pub total_points_earned: f64,
    pub max_points: f64,
    pub score_percentage: f64,
    pub feedback: Option<String>,
    pub is_late_submission: bool,
    pub submitted_at: Option<String>,
    pub graded_at: Option<String>,
    pub graded_by: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::models::assignment_submission::Model> for SubmissionResponse {
    fn from(submission: db::models::assignment_submission::Model) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            course_id: submission.course_id,
            status: submission.status.to_string(),
            answers: submission.answers,
            total_points_earned: submission.total_points_earned,
            max_points: submission.max_points,
            score_percentage: submission.score_percentage,
            feedback: submission.feedback,
            is_late_submission: submission.is_late_submission,
            submitted_at: submission.submitted_at.map(|d| d.to_rfc3339()),
            graded_at: submission.graded_at.map(|d| d.to_rfc3339()),
            graded_by: submission.graded_by,
            created_at: submission.created_at.to_rfc3339(),
            updated_at: submission.updated_at.to_rfc3339(),
        }
    }
}
