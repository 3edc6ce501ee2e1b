use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::PaginatorTrait;
use serde::Serialize;
use util::question_bank::QuestionList;

/// Represents an instructor-authored assignment: an ordered set of questions
/// plus the grading policy for one section of a course.
///
/// Structurally immutable once any submission references it; the update
/// endpoint enforces that precondition so frozen `max_points` values and
/// auto-graded answers on submissions stay valid.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Section this assignment appears in.
    pub section_id: i64,
    /// Course the section belongs to (denormalized for stats queries).
    pub course_id: i64,
    /// The owning instructor.
    pub instructor_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    /// Finalizing after this instant flags the submission as late.
    pub due_date: Option<DateTime<Utc>>,
    /// Ordered question list, embedded as JSON.
    #[sea_orm(column_type = "Json")]
    pub questions: QuestionList,
    /// Sum of question points unless explicitly overridden at creation.
    pub total_points: f64,
    /// Percentage a graded submission must reach to pass.
    pub passing_score_percent: f64,
    pub allow_late_submission: bool,
    /// Stored policy only; never subtracted from a score.
    pub late_penalty_percent: f64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::InstructorId",
        to = "super::user::Column::Id"
    )]
    Instructor,

    #[sea_orm(has_many = "super::assignment_submission::Entity")]
    Submission,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::assignment_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether any submission record references this assignment.
    ///
    /// Structural edits are rejected while this holds; run it inside the same
    /// transaction as the write so no submission can slip in between the
    /// check and the edit.
    pub async fn has_submissions<C: ConnectionTrait>(&self, db: &C) -> Result<bool, DbErr> {
        let count = super::assignment_submission::Entity::find()
            .filter(super::assignment_submission::Column::AssignmentId.eq(self.id))
            .count(db)
            .await?;
        Ok(count > 0)
    }
}
