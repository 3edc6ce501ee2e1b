//! Question bank: the JSON schema shared between assignments and submissions.
//!
//! An assignment embeds an ordered list of [`Question`]s in a JSON column; a
//! submission embeds the matching list of [`Answer`]s. Both sides live here so
//! the grading crate can operate on them without touching the database layer.
//!
//! Validation is pure: [`validate_questions`] normalizes an instructor-supplied
//! question payload and [`validate_answers`] checks a student's answers against
//! the assignment's question set. Neither performs I/O.

pub mod answer;
pub mod question;

pub use answer::{Answer, AnswerInput, AnswerList, AnswerValue, validate_answers};
pub use question::{
    Question, QuestionInput, QuestionList, QuestionOption, QuestionType, validate_questions,
};

use thiserror::Error;

/// Rejection reasons for malformed question or answer payloads.
///
/// Positions are zero-based indexes into the submitted list, reported so the
/// caller can point at the offending entry.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("an assignment requires at least one question")]
    NoQuestions,
    #[error("question at position {0} has an empty prompt")]
    EmptyPrompt(usize),
    #[error("question at position {0} must be worth a positive number of points")]
    NonPositivePoints(usize),
    #[error("multiple-choice question at position {0} has no options")]
    NoOptions(usize),
    #[error("multiple-choice question at position {0} has no option marked correct")]
    NoCorrectOption(usize),
    #[error("duplicate question id {0}")]
    DuplicateQuestionId(i64),
    #[error("answer references unknown question id {0}")]
    UnknownQuestion(i64),
    #[error("answer for question {0} does not match the question type")]
    AnswerTypeMismatch(i64),
    #[error("more than one answer supplied for question {0}")]
    DuplicateAnswer(i64),
}
