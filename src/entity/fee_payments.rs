//! 缴费记录实体

use sea_orm::entity::prelude::*;

use super::parse_date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub fee_structure_id: i64,
    #[sea_orm(column_type = "Double")]
    pub amount_paid: f64,
    pub payment_date: String,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub is_paid: bool,
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
        belongs_to = "super::fee_structures::Entity",
        from = "Column::FeeStructureId",
        to = "super::fee_structures::Column::Id"
    )]
    FeeStructure,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::fees::entities::FeePayment {
    fn from(model: Model) -> Self {
        use crate::models::fees::entities::PaymentMethod;

        Self {
            id: model.id,
            student_id: model.student_id,
            fee_structure_id: model.fee_structure_id,
            amount_paid: model.amount_paid,
            payment_date: parse_date(&model.payment_date),
            payment_method: model.payment_method.parse().unwrap_or(PaymentMethod::Cash),
            transaction_id: model.transaction_id,
            is_paid: model.is_paid,
        }
    }
}
