//! 学生档案实体

use sea_orm::entity::prelude::*;

use super::parse_date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub student_code: String,
    pub enrollment_date: String,
    pub grade: String,
    pub section: String,
    pub parent_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::parents::Entity",
        from = "Column::ParentId",
        to = "super::parents::Column::Id"
    )]
    Parent,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::parents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::profiles::entities::Student {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            student_code: model.student_code,
            enrollment_date: parse_date(&model.enrollment_date),
            grade: model.grade,
            section: model.section,
            parent_id: model.parent_id,
        }
    }
}

