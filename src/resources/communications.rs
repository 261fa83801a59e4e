use sea_orm::{ColumnTrait, Condition, QueryOrder, Select, Set};

use super::{CrudResource, active_value, staff_may_write};
use crate::access::{Action, Actor, Scope};
use crate::entity::{announcements, messages, notifications, reports};
use crate::errors::Result;
use crate::models::FieldErrors;
use crate::models::communications::entities::{
    Announcement, Audience, Message, Notification, Report,
};
use crate::models::communications::requests::{
    CreateAnnouncementRequest, CreateMessageRequest, CreateNotificationRequest,
    CreateReportRequest, UpdateAnnouncementRequest, UpdateMessageRequest,
    UpdateNotificationRequest, UpdateReportRequest,
};
use crate::models::users::entities::UserRole;

/// 角色可见的公告：管理员看全部有效公告，校长只看面向全体的，其余角色看全体与本角色的
pub fn announcement_visibility(role: UserRole) -> Condition {
    let active = Condition::all().add(announcements::Column::IsActive.eq(true));
    match (role, Audience::for_role(&role)) {
        (UserRole::Admin, _) => active,
        (_, Some(audience)) => active.add(
            announcements::Column::TargetAudience
                .is_in([Audience::All.as_str(), audience.as_str()]),
        ),
        (_, None) => active.add(announcements::Column::TargetAudience.eq(Audience::All.as_str())),
    }
}

pub struct AnnouncementResource;

impl CrudResource for AnnouncementResource {
    type Entity = announcements::Entity;
    type Model = announcements::Model;
    type ActiveModel = announcements::ActiveModel;
    type Create = CreateAnnouncementRequest;
    type Update = UpdateAnnouncementRequest;
    type Output = Announcement;

    const NAME: &'static str = "Announcement";
    const PATH: &'static str = "announcements";

    fn id_column() -> announcements::Column {
        announcements::Column::Id
    }

    fn order(select: Select<announcements::Entity>) -> Select<announcements::Entity> {
        select
            .order_by_desc(announcements::Column::CreatedDate)
            .order_by_desc(announcements::Column::Id)
    }

    fn scope(actor: &Actor) -> Scope {
        Scope::only(announcement_visibility(actor.role()))
    }

    // 教师只能修改自己发布的公告
    fn write_scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Teacher => Scope::only(
                Condition::all().add(announcements::Column::CreatedBy.eq(actor.id())),
            ),
            _ => Self::scope(actor),
        }
    }

    fn permits(actor: &Actor, _action: Action) -> bool {
        staff_may_write(actor)
    }

    fn validate(model: &announcements::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = active_value(&model.title) {
            errors.not_blank("title", title);
        }
        if let Some(content) = active_value(&model.content) {
            errors.not_blank("content", content);
        }
        errors
    }

    fn new_model(
        actor: &Actor,
        req: CreateAnnouncementRequest,
        now: i64,
    ) -> Result<announcements::ActiveModel> {
        Ok(announcements::ActiveModel {
            title: Set(req.title),
            content: Set(req.content),
            created_by: Set(actor.id()),
            created_date: Set(now),
            target_audience: Set(req.target_audience.unwrap_or(Audience::All).to_string()),
            is_active: Set(req.is_active.unwrap_or(true)),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut announcements::ActiveModel,
        req: UpdateAnnouncementRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(content) = req.content {
            model.content = Set(content);
        }
        if let Some(audience) = req.target_audience {
            model.target_audience = Set(audience.to_string());
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        Ok(())
    }
}

pub struct MessageResource;

impl CrudResource for MessageResource {
    type Entity = messages::Entity;
    type Model = messages::Model;
    type ActiveModel = messages::ActiveModel;
    type Create = CreateMessageRequest;
    type Update = UpdateMessageRequest;
    type Output = Message;

    const NAME: &'static str = "Message";
    const PATH: &'static str = "messages";

    fn id_column() -> messages::Column {
        messages::Column::Id
    }

    fn order(select: Select<messages::Entity>) -> Select<messages::Entity> {
        select
            .order_by_desc(messages::Column::SentDate)
            .order_by_desc(messages::Column::Id)
    }

    // 发件人或收件人可见
    fn scope(actor: &Actor) -> Scope {
        Scope::only(
            Condition::any()
                .add(messages::Column::SenderId.eq(actor.id()))
                .add(messages::Column::ReceiverId.eq(actor.id())),
        )
    }

    fn permits(_actor: &Actor, _action: Action) -> bool {
        true
    }

    fn validate(model: &messages::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(subject) = active_value(&model.subject) {
            errors.not_blank("subject", subject);
        }
        errors
    }

    fn new_model(
        actor: &Actor,
        req: CreateMessageRequest,
        now: i64,
    ) -> Result<messages::ActiveModel> {
        Ok(messages::ActiveModel {
            sender_id: Set(actor.id()),
            receiver_id: Set(req.receiver_id),
            subject: Set(req.subject),
            content: Set(req.content),
            sent_date: Set(now),
            is_read: Set(false),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut messages::ActiveModel,
        req: UpdateMessageRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(is_read) = req.is_read {
            model.is_read = Set(is_read);
        }
        Ok(())
    }
}

pub struct NotificationResource;

impl CrudResource for NotificationResource {
    type Entity = notifications::Entity;
    type Model = notifications::Model;
    type ActiveModel = notifications::ActiveModel;
    type Create = CreateNotificationRequest;
    type Update = UpdateNotificationRequest;
    type Output = Notification;

    const NAME: &'static str = "Notification";
    const PATH: &'static str = "notifications";

    fn id_column() -> notifications::Column {
        notifications::Column::Id
    }

    fn order(select: Select<notifications::Entity>) -> Select<notifications::Entity> {
        select
            .order_by_desc(notifications::Column::CreatedDate)
            .order_by_desc(notifications::Column::Id)
    }

    fn scope(actor: &Actor) -> Scope {
        Scope::only(Condition::all().add(notifications::Column::UserId.eq(actor.id())))
    }

    // 通知由管理员发出，收件人可以标记已读或删除
    fn permits(actor: &Actor, action: Action) -> bool {
        match action {
            Action::Create => actor.is_administrator(),
            Action::Update | Action::Delete => true,
        }
    }

    fn validate(model: &notifications::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = active_value(&model.title) {
            errors.not_blank("title", title);
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateNotificationRequest,
        now: i64,
    ) -> Result<notifications::ActiveModel> {
        Ok(notifications::ActiveModel {
            user_id: Set(req.user_id),
            title: Set(req.title),
            message: Set(req.message),
            notification_type: Set(req.notification_type.to_string()),
            created_date: Set(now),
            is_read: Set(false),
            sent_via_email: Set(req.sent_via_email),
            sent_via_sms: Set(req.sent_via_sms),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut notifications::ActiveModel,
        req: UpdateNotificationRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(is_read) = req.is_read {
            model.is_read = Set(is_read);
        }
        Ok(())
    }
}

pub struct ReportResource;

impl CrudResource for ReportResource {
    type Entity = reports::Entity;
    type Model = reports::Model;
    type ActiveModel = reports::ActiveModel;
    type Create = CreateReportRequest;
    type Update = UpdateReportRequest;
    type Output = Report;

    const NAME: &'static str = "Report";
    const PATH: &'static str = "reports";

    fn id_column() -> reports::Column {
        reports::Column::Id
    }

    fn order(select: Select<reports::Entity>) -> Select<reports::Entity> {
        select
            .order_by_desc(reports::Column::GeneratedDate)
            .order_by_desc(reports::Column::Id)
    }

    fn write_scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Teacher => {
                Scope::only(Condition::all().add(reports::Column::GeneratedBy.eq(actor.id())))
            }
            _ => Self::scope(actor),
        }
    }

    fn permits(actor: &Actor, _action: Action) -> bool {
        staff_may_write(actor)
    }

    fn validate(model: &reports::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = active_value(&model.title) {
            errors.not_blank("title", title);
        }
        if let Some(file) = active_value(&model.file) {
            errors.not_blank("file", file);
        }
        errors
    }

    fn new_model(
        actor: &Actor,
        req: CreateReportRequest,
        now: i64,
    ) -> Result<reports::ActiveModel> {
        let parameters = req
            .parameters
            .map(|value| serde_json::to_string(&value))
            .transpose()?;
        Ok(reports::ActiveModel {
            title: Set(req.title),
            report_type: Set(req.report_type.to_string()),
            generated_by: Set(actor.id()),
            generated_date: Set(now),
            file: Set(req.file),
            parameters: Set(parameters),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut reports::ActiveModel,
        req: UpdateReportRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(kind) = req.report_type {
            model.report_type = Set(kind.to_string());
        }
        if let Some(file) = req.file {
            model.file = Set(file);
        }
        if let Some(parameters) = req.parameters {
            model.parameters = Set(parameters.map(|p| serde_json::to_string(&p)).transpose()?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Profile, tests::user_with_role};
    use crate::models::communications::entities::ReportType;

    #[test]
    fn test_creator_and_sender_forced() {
        let teacher = Actor::new(user_with_role(12, UserRole::Teacher), Profile::None);
        let req = CreateAnnouncementRequest {
            title: "Sports day".to_string(),
            content: "Friday".to_string(),
            target_audience: None,
            is_active: None,
        };
        let model = AnnouncementResource::new_model(&teacher, req, 5).unwrap();
        assert_eq!(active_value(&model.created_by), Some(&12));
        assert_eq!(active_value(&model.target_audience).map(String::as_str), Some("all"));
        assert_eq!(active_value(&model.is_active), Some(&true));

        let req = CreateMessageRequest {
            receiver_id: 3,
            subject: "Homework".to_string(),
            content: "Page 4".to_string(),
        };
        let model = MessageResource::new_model(&teacher, req, 5).unwrap();
        assert_eq!(active_value(&model.sender_id), Some(&12));
        assert_eq!(active_value(&model.is_read), Some(&false));
    }

    #[test]
    fn test_report_parameters_stored_as_json_text() {
        let teacher = Actor::new(user_with_role(12, UserRole::Teacher), Profile::None);
        let req = CreateReportRequest {
            title: "Term 1".to_string(),
            report_type: ReportType::Attendance,
            file: "reports/term1.pdf".to_string(),
            parameters: Some(serde_json::json!({"grade": "Grade 1"})),
        };
        let model = ReportResource::new_model(&teacher, req, 5).unwrap();
        assert_eq!(
            active_value(&model.parameters).and_then(|p| p.as_deref()),
            Some(r#"{"grade":"Grade 1"}"#)
        );
        assert_eq!(active_value(&model.generated_by), Some(&12));
    }

    #[test]
    fn test_notification_permissions() {
        let student = Actor::new(user_with_role(3, UserRole::Student), Profile::None);
        assert!(!NotificationResource::permits(&student, Action::Create));
        assert!(NotificationResource::permits(&student, Action::Update));
        assert!(MessageResource::permits(&student, Action::Create));
        assert!(!AnnouncementResource::permits(&student, Action::Create));
    }

    #[test]
    fn test_every_role_has_an_announcement_scope() {
        for role in UserRole::all_roles() {
            let actor = Actor::new(user_with_role(1, **role), Profile::None);
            assert!(matches!(AnnouncementResource::scope(&actor), Scope::Only(_)));
        }
    }
}
