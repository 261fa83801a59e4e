//! 课程表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timetables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub day: String,
    pub period: i32,
    pub subject_id: i64,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::academics::entities::Timetable {
    fn from(model: Model) -> Self {
        use crate::models::academics::entities::Weekday;

        Self {
            id: model.id,
            class_id: model.class_id,
            day: model.day.parse().unwrap_or(Weekday::Monday),
            period: model.period,
            subject_id: model.subject_id,
            start_time: model.start_time,
            end_time: model.end_time,
        }
    }
}
