//! Deterministic scoring of objective (multiple-choice) answers.

use util::question_bank::{AnswerList, AnswerValue, QuestionList, QuestionType};

/// Scores every multiple-choice answer in place and returns the total points
/// earned across **all** answers.
///
/// An answer is correct iff its selected text equals the text of an option
/// flagged correct on its question (single-answer semantics). Correct answers
/// earn the question's full point value; incorrect ones earn zero and both are
/// stamped with `is_correct`. Answers to non-multiple-choice questions pass
/// through untouched, so previously assigned manual points survive a re-run.
///
/// Pure function of (questions, answers); no side effects beyond the mutation.
pub fn auto_grade(questions: &QuestionList, answers: &mut AnswerList) -> f64 {
    for answer in &mut answers.0 {
        let Some(question) = questions.find(answer.question_id) else {
            continue;
        };
        if question.kind != QuestionType::MultipleChoice {
            continue;
        }

        let correct = match &answer.value {
            AnswerValue::MultipleChoice { selected } => question
                .options
                .iter()
                .any(|opt| opt.is_correct && opt.text == *selected),
            _ => false,
        };

        answer.is_correct = Some(correct);
        answer.points_earned = if correct { question.points } else { 0.0 };
    }

    answers.total_points_earned()
}
