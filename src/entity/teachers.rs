//! 教师档案实体

use sea_orm::entity::prelude::*;

use super::parse_date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub teacher_code: String,
    pub hire_date: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub qualifications: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::profiles::entities::Teacher {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            teacher_code: model.teacher_code,
            hire_date: parse_date(&model.hire_date),
            qualifications: model.qualifications,
        }
    }
}
