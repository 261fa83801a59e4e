//! 公告实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_by: i64,
    pub created_date: i64,
    pub target_audience: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::communications::entities::Announcement {
    fn from(model: Model) -> Self {
        use crate::models::communications::entities::Audience;

        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            created_by: model.created_by,
            created_date: to_datetime(model.created_date),
            target_audience: model.target_audience.parse().unwrap_or(Audience::All),
            is_active: model.is_active,
        }
    }
}
