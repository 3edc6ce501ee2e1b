//! Instructor-driven grading of subjective answers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use util::question_bank::{AnswerList, QuestionList};

use crate::error::GraderError;

/// Applies instructor-supplied per-question grades and feedback in place and
/// returns the recomputed total over **all** answers.
///
/// Each supplied score is clamped into `[0, question.points]` and the matching
/// answer is stamped with feedback, `graded_at`, and `graded_by`. The total is
/// recomputed from the full answer set rather than as a delta, so a partial
/// re-grade folds in points earned earlier by auto-grading. Supplying the same
/// input twice yields the same result.
///
/// A grade for a question id the assignment does not contain is an error; a
/// grade for a question the student never answered is skipped, matching the
/// behavior of grading against the recorded answer set.
pub fn apply_grades(
    questions: &QuestionList,
    answers: &mut AnswerList,
    grades: &HashMap<i64, f64>,
    feedback: &HashMap<i64, String>,
    grader_id: i64,
    now: DateTime<Utc>,
) -> Result<f64, GraderError> {
    for (&question_id, &points) in grades {
        let question = questions
            .find(question_id)
            .ok_or(GraderError::UnknownQuestion(question_id))?;

        let Some(answer) = answers.0.iter_mut().find(|a| a.question_id == question_id) else {
            continue;
        };

        answer.points_earned = points.clamp(0.0, question.points);
        answer.feedback = feedback.get(&question_id).cloned();
        answer.graded_at = Some(now);
        answer.graded_by = Some(grader_id);
    }

    Ok(answers.total_points_earned())
}
