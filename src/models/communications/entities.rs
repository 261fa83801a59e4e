use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::models::users::entities::UserRole;

string_enum! {
    /// 公告面向的人群
    Audience {
        All => "all",
        Teachers => "teachers",
        Students => "students",
        Parents => "parents",
    }
}

impl Audience {
    /// 角色对应的人群，管理员与校长没有专属人群
    pub fn for_role(role: &UserRole) -> Option<Self> {
        match role {
            UserRole::Teacher => Some(Audience::Teachers),
            UserRole::Student => Some(Audience::Students),
            UserRole::Parent => Some(Audience::Parents),
            UserRole::Admin | UserRole::Principal => None,
        }
    }
}

string_enum! {
    NotificationType {
        Announcement => "announcement",
        Attendance => "attendance",
        Fee => "fee",
        Assessment => "assessment",
        Message => "message",
    }
}

string_enum! {
    ReportType {
        Academic => "academic",
        Attendance => "attendance",
        Fee => "fee",
        Class => "class",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_by: i64,
    pub created_date: DateTime<Utc>,
    pub target_audience: Audience,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub subject: String,
    pub content: String,
    pub sent_date: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub created_date: DateTime<Utc>,
    pub is_read: bool,
    pub sent_via_email: bool,
    pub sent_via_sms: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    pub report_type: ReportType,
    pub generated_by: i64,
    pub generated_date: DateTime<Utc>,
    pub file: String,
    pub parameters: Option<serde_json::Value>,
}
