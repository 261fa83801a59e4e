//! 考勤实体

use sea_orm::entity::prelude::*;

use super::parse_date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: String,
    pub status: String,
    pub marked_by: i64,
    pub class_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::MarkedBy",
        to = "super::teachers::Column::Id"
    )]
    MarkedBy,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::attendance::entities::Attendance {
    fn from(model: Model) -> Self {
        use crate::models::attendance::entities::AttendanceStatus;

        Self {
            id: model.id,
            student_id: model.student_id,
            date: parse_date(&model.date),
            status: model.status.parse().unwrap_or(AttendanceStatus::Present),
            marked_by: model.marked_by,
            class_id: model.class_id,
        }
    }
}
