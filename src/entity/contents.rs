//! 学习资料实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub content_type: String,
    pub file: String,
    pub subject_id: i64,
    pub grade: String,
    pub chapter: Option<String>,
    pub uploaded_by: i64,
    pub upload_date: i64,
    pub is_homework: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::UploadedBy",
        to = "super::teachers::Column::Id"
    )]
    Uploader,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::academics::entities::Content {
    fn from(model: Model) -> Self {
        use crate::models::academics::entities::ContentType;

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            content_type: model.content_type.parse().unwrap_or(ContentType::Pdf),
            file: model.file,
            subject_id: model.subject_id,
            grade: model.grade,
            chapter: model.chapter,
            uploaded_by: model.uploaded_by,
            upload_date: to_datetime(model.upload_date),
            is_homework: model.is_homework,
        }
    }
}
