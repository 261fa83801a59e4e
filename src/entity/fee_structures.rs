//! 收费标准实体

use sea_orm::entity::prelude::*;

use super::parse_date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academic_year_id: i64,
    pub fee_type: String,
    pub grade: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub due_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academic_years::Entity",
        from = "Column::AcademicYearId",
        to = "super::academic_years::Column::Id"
    )]
    AcademicYear,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::fees::entities::FeeStructure {
    fn from(model: Model) -> Self {
        use crate::models::fees::entities::FeeType;

        Self {
            id: model.id,
            academic_year_id: model.academic_year_id,
            fee_type: model.fee_type.parse().unwrap_or(FeeType::Misc),
            grade: model.grade,
            amount: model.amount,
            due_date: parse_date(&model.due_date),
        }
    }
}
