//! 家长档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub parent_code: String,
    pub occupation: Option<String>,
    pub relationship_to_student: String,
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

impl From<Model> for crate::models::profiles::entities::Parent {
    fn from(model: Model) -> Self {
        use crate::models::profiles::entities::Relationship;

        Self {
            id: model.id,
            user_id: model.user_id,
            parent_code: model.parent_code,
            occupation: model.occupation,
            relationship_to_student: model
                .relationship_to_student
                .parse()
                .unwrap_or(Relationship::Father),
        }
    }
}
