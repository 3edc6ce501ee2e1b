use std::collections::HashSet;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Default point value for a question when the author omits one.
pub const DEFAULT_QUESTION_POINTS: f64 = 10.0;

/// The four supported question kinds.
///
/// Only `multiple-choice` is auto-gradable; the rest wait for manual review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    Essay,
    FileUpload,
}

impl QuestionType {
    /// Whether answers of this kind can be scored without a human grader.
    pub fn is_auto_gradable(self) -> bool {
        matches!(self, QuestionType::MultipleChoice)
    }
}

/// A single selectable option on a multiple-choice question.
///
/// The options flagged `is_correct` form the answer key. Grading matches a
/// single selected string, so single-correct-answer semantics apply even
/// though the schema permits several flagged options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A validated question embedded in an assignment.
///
/// Immutable once submissions reference the assignment (enforced by the
/// assignment update precondition, not by this type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the owning assignment.
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub prompt: String,
    pub points: f64,
    pub order: i32,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

/// Raw question payload as supplied by an instructor, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub prompt: String,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub rubric: Option<String>,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// Newtype for storing the question list in a JSON column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct QuestionList(pub Vec<Question>);

impl QuestionList {
    /// Sum of all question point values.
    pub fn total_points(&self) -> f64 {
        self.0.iter().map(|q| q.points).sum()
    }

    pub fn find(&self, id: i64) -> Option<&Question> {
        self.0.iter().find(|q| q.id == id)
    }

    /// True when every question can be scored by the auto-grading engine.
    pub fn all_auto_gradable(&self) -> bool {
        self.0.iter().all(|q| q.kind.is_auto_gradable())
    }
}

/// Validates and normalizes an instructor-authored question payload.
///
/// Rules:
/// - at least one question,
/// - non-empty prompt and strictly positive points (default 10),
/// - multiple-choice questions need a non-empty option list with at least one
///   option marked correct,
/// - ids must be unique; omitted ids are assigned 1-based from list position,
///   and omitted `order` values are assigned from list position.
pub fn validate_questions(inputs: Vec<QuestionInput>) -> Result<QuestionList, ValidationError> {
    if inputs.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    let mut seen_ids: HashSet<i64> = HashSet::new();
    let mut questions = Vec::with_capacity(inputs.len());

    for (position, input) in inputs.into_iter().enumerate() {
        if input.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt(position));
        }

        let points = input.points.unwrap_or(DEFAULT_QUESTION_POINTS);
        if points <= 0.0 {
            return Err(ValidationError::NonPositivePoints(position));
        }

        if input.kind == QuestionType::MultipleChoice {
            if input.options.is_empty() {
                return Err(ValidationError::NoOptions(position));
            }
            if !input.options.iter().any(|opt| opt.is_correct) {
                return Err(ValidationError::NoCorrectOption(position));
            }
        }

        let id = input.id.unwrap_or(position as i64 + 1);
        if !seen_ids.insert(id) {
            return Err(ValidationError::DuplicateQuestionId(id));
        }

        questions.push(Question {
            id,
            kind: input.kind,
            prompt: input.prompt,
            points,
            order: input.order.unwrap_or(position as i32),
            options: input.options,
            rubric: input.rubric,
            hints: input.hints,
        });
    }

    Ok(QuestionList(questions))
}
