//! 报表实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub report_type: String,
    pub generated_by: i64,
    pub generated_date: i64,
    pub file: String,
    // JSON 文本
    #[sea_orm(column_type = "Text", nullable)]
    pub parameters: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::GeneratedBy",
        to = "super::users::Column::Id"
    )]
    GeneratedBy,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::communications::entities::Report {
    fn from(model: Model) -> Self {
        use crate::models::communications::entities::ReportType;

        Self {
            id: model.id,
            title: model.title,
            report_type: model.report_type.parse().unwrap_or(ReportType::Academic),
            generated_by: model.generated_by,
            generated_date: to_datetime(model.generated_date),
            file: model.file,
            parameters: model
                .parameters
                .and_then(|raw| serde_json::from_str(&raw).ok()),
        }
    }
}
