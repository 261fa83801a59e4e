//! 通知实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub notification_type: String,
    pub created_date: i64,
    pub is_read: bool,
    pub sent_via_email: bool,
    pub sent_via_sms: bool,
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

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::communications::entities::Notification {
    fn from(model: Model) -> Self {
        use crate::models::communications::entities::NotificationType;

        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            message: model.message,
            notification_type: model
                .notification_type
                .parse()
                .unwrap_or(NotificationType::Announcement),
            created_date: to_datetime(model.created_date),
            is_read: model.is_read,
            sent_via_email: model.sent_via_email,
            sent_via_sms: model.sent_via_sms,
        }
    }
}
