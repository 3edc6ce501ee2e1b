use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use thiserror::Error;
use util::question_bank::AnswerList;

/// Lifecycle state of a submission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Student is still editing; answers may be overwritten freely.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Finalized but waiting on manual grading of subjective questions.
    #[sea_orm(string_value = "submitted")]
    Submitted,
    /// Scoring complete (fully auto-graded, or an instructor has graded).
    #[sea_orm(string_value = "graded")]
    Graded,
    /// Reserved for a future re-open flow; no transition produces or
    /// accepts it.
    #[sea_orm(string_value = "resubmitted")]
    Resubmitted,
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status_str = match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
            SubmissionStatus::Resubmitted => "resubmitted",
        };
        write!(f, "{}", status_str)
    }
}

/// Events that may move a submission through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// Student saves without finalizing.
    SaveDraft,
    /// Student finalizes. `all_auto` is true when every question in the
    /// assignment is auto-gradable; `manually_graded` is true when an
    /// instructor has already graded this record.
    Finalize { all_auto: bool, manually_graded: bool },
    /// Instructor grades (or re-grades) the record.
    ManualGrade,
}

impl SubmissionEvent {
    fn name(self) -> &'static str {
        match self {
            SubmissionEvent::SaveDraft => "save a draft of",
            SubmissionEvent::Finalize { .. } => "finalize",
            SubmissionEvent::ManualGrade => "grade",
        }
    }
}

/// Raised when an event is not legal from the current status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot {action} a {from} submission")]
pub struct TransitionError {
    pub from: SubmissionStatus,
    pub action: &'static str,
}

impl SubmissionStatus {
    /// The single transition function for the submission lifecycle.
    ///
    /// `draft → submitted → graded`, with `submitted` skipped when every
    /// question is auto-gradable. Re-finalizing before an instructor has
    /// graded simply re-scores; once manually graded, only `ManualGrade` is
    /// accepted. Illegal combinations (grading a draft, drafting after
    /// finalization, anything touching `resubmitted`) return an error
    /// instead of silently writing a status.
    pub fn transition(self, event: SubmissionEvent) -> Result<SubmissionStatus, TransitionError> {
        use SubmissionEvent::*;
        use SubmissionStatus::*;

        match (self, event) {
            (Draft, SaveDraft) => Ok(Draft),
            (Draft | Submitted, Finalize { all_auto, .. }) => {
                Ok(if all_auto { Graded } else { Submitted })
            }
            (
                Graded,
                Finalize {
                    all_auto,
                    manually_graded: false,
                },
            ) => Ok(if all_auto { Graded } else { Submitted }),
            (Submitted | Graded, ManualGrade) => Ok(Graded),
            (from, event) => Err(TransitionError {
                from,
                action: event.name(),
            }),
        }
    }
}

/// Represents one student's submission for one assignment.
///
/// Unique per (assignment, student). `max_points` is copied from the
/// assignment when the record is first created and never updated, so later
/// assignment edits cannot retroactively change a student's denominator.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "assignment_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the related assignment.
    pub assignment_id: i64,
    /// ID of the student who owns this record.
    pub student_id: i64,
    /// Course the assignment belongs to (denormalized for stats queries).
    pub course_id: i64,
    /// The student's answers, embedded as JSON.
    #[sea_orm(column_type = "Json")]
    pub answers: AnswerList,
    /// Current lifecycle state.
    pub status: SubmissionStatus,
    /// Sum of `points_earned` across all answers.
    pub total_points_earned: f64,
    /// Frozen copy of the assignment's `total_points` at record creation.
    pub max_points: f64,
    /// `total_points_earned / max_points * 100`, rounded to 2 decimals.
    pub score_percentage: f64,
    /// Assignment-level feedback from the grader.
    pub feedback: Option<String>,
    /// Set once at finalization when past the due date.
    pub is_late_submission: bool,
    /// Timestamp of the most recent finalization.
    pub submitted_at: Option<DateTime<Utc>>,
    pub graded_at: Option<DateTime<Utc>>,
    /// The instructor who manually graded this record, if any.
    pub graded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id"
    )]
    Assignment,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether an instructor has graded this record. Auto-graded records
    /// carry no `graded_by` and may still be re-finalized.
    pub fn manually_graded(&self) -> bool {
        self.graded_by.is_some()
    }

    /// Looks up the unique record for (assignment, student).
    pub async fn find_by_assignment_and_student<C: ConnectionTrait>(
        db: &C,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }
}
