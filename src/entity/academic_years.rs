//! 学年实体

use sea_orm::entity::prelude::*;

use super::parse_date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_years")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::academics::entities::AcademicYear {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            start_date: parse_date(&model.start_date),
            end_date: parse_date(&model.end_date),
            is_active: model.is_active,
        }
    }
}
