//! 测评实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub assessment_type: String,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub scheduled_date: i64,
    pub duration_minutes: i32,
    pub total_marks: i32,
    pub created_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::assessments::entities::Assessment {
    fn from(model: Model) -> Self {
        use crate::models::assessments::entities::AssessmentType;

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            assessment_type: model
                .assessment_type
                .parse()
                .unwrap_or(AssessmentType::Quiz),
            subject_id: model.subject_id,
            class_id: model.class_id,
            teacher_id: model.teacher_id,
            scheduled_date: to_datetime(model.scheduled_date),
            duration_minutes: model.duration_minutes,
            total_marks: model.total_marks,
            created_date: to_datetime(model.created_date),
        }
    }
}
