use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use super::question::{Question, QuestionList, QuestionType};
use super::ValidationError;

/// The value a student supplied for one question, tagged by question kind.
///
/// Replaces the untyped "anything goes" answer field: the grading engine can
/// match exhaustively instead of probing loose JSON. File uploads carry an
/// opaque attachment reference; storage mechanics live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnswerValue {
    MultipleChoice { selected: String },
    ShortAnswer { text: String },
    Essay { text: String },
    FileUpload { attachment_ref: String },
}

impl AnswerValue {
    /// The question kind this value is shaped for.
    pub fn question_type(&self) -> QuestionType {
        match self {
            AnswerValue::MultipleChoice { .. } => QuestionType::MultipleChoice,
            AnswerValue::ShortAnswer { .. } => QuestionType::ShortAnswer,
            AnswerValue::Essay { .. } => QuestionType::Essay,
            AnswerValue::FileUpload { .. } => QuestionType::FileUpload,
        }
    }
}

/// One graded (or pending) answer inside a submission record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: i64,
    pub question_type: QuestionType,
    pub value: AnswerValue,
    /// Set by the auto-grading engine for multiple-choice answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub points_earned: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graded_by: Option<i64>,
}

/// Raw answer payload as submitted by a student.
///
/// The tagged value fields sit flattened next to `question_id`, e.g.
/// `{"question_id": 1, "type": "multiple-choice", "selected": "Paris"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerInput {
    pub question_id: i64,
    #[serde(flatten)]
    pub value: AnswerValue,
}

/// Newtype for storing the answer list in a JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AnswerList(pub Vec<Answer>);

impl Default for AnswerList {
    fn default() -> Self {
        AnswerList(Vec::new())
    }
}

impl AnswerList {
    /// Sum of `points_earned` across all answers.
    pub fn total_points_earned(&self) -> f64 {
        self.0.iter().map(|a| a.points_earned).sum()
    }
}

/// Checks a student's answers against the assignment's question set and builds
/// fresh, ungraded [`Answer`] records.
///
/// Every answer must reference an existing question, carry a value shaped for
/// that question's kind, and no question may be answered twice. Points start
/// at zero; grading fills them in later.
pub fn validate_answers(
    questions: &QuestionList,
    inputs: Vec<AnswerInput>,
) -> Result<AnswerList, ValidationError> {
    let mut seen: HashSet<i64> = HashSet::new();
    let mut answers = Vec::with_capacity(inputs.len());

    for input in inputs {
        let question: &Question = questions
            .find(input.question_id)
            .ok_or(ValidationError::UnknownQuestion(input.question_id))?;

        if input.value.question_type() != question.kind {
            return Err(ValidationError::AnswerTypeMismatch(input.question_id));
        }

        if !seen.insert(input.question_id) {
            return Err(ValidationError::DuplicateAnswer(input.question_id));
        }

        answers.push(Answer {
            question_id: input.question_id,
            question_type: question.kind,
            value: input.value,
            is_correct: None,
            points_earned: 0.0,
            feedback: None,
            graded_at: None,
            graded_by: None,
        });
    }

    Ok(AnswerList(answers))
}
