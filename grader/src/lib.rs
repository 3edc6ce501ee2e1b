//! # Grader Library
//!
//! Core logic for scoring assignment submissions. The engines here are pure
//! functions over the question-bank types: they take an assignment's question
//! set and a submission's answers, and return updated answers plus totals.
//! Persistence and authorization stay with the caller.
//!
//! ## Key concepts
//! - **Auto-grading**: deterministic scoring of multiple-choice answers by
//!   exact text match against the option flagged correct.
//! - **Manual grading**: instructor-supplied per-question points (clamped to
//!   the question's worth) and feedback for subjective answers.
//! - **Scoring**: percentage, pass/fail, and lateness helpers shared by both
//!   engines and the statistics endpoints.

pub mod auto;
pub mod error;
pub mod manual;
pub mod scorer;

pub use auto::auto_grade;
pub use error::GraderError;
pub use manual::apply_grades;
pub use scorer::{is_late, passed, percentage};
