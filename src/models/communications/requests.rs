use serde::Deserialize;

use crate::models::common::nullable;

use super::entities::{Audience, NotificationType, ReportType};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub target_audience: Option<Audience>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub target_audience: Option<Audience>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageRequest {
    pub receiver_id: i64,
    pub subject: String,
    pub content: String,
}

/// 消息创建后只允许修改已读状态
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMessageRequest {
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    #[serde(default)]
    pub sent_via_email: bool,
    #[serde(default)]
    pub sent_via_sms: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotificationRequest {
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportRequest {
    pub title: String,
    pub report_type: ReportType,
    pub file: String,
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReportRequest {
    pub title: Option<String>,
    pub report_type: Option<ReportType>,
    pub file: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub parameters: Option<Option<serde_json::Value>>,
}
