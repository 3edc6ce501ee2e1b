use thiserror::Error;

/// Errors raised while applying grades to a submission.
#[derive(Debug, Error, PartialEq)]
pub enum GraderError {
    /// A grade was supplied for a question id the assignment does not contain.
    #[error("grade supplied for unknown question id {0}")]
    UnknownQuestion(i64),
}
