use sea_orm::{ColumnTrait, Condition, QueryOrder, Select, Set};

use super::{CrudResource, owner_from_payload, require_teacher, staff_may_write};
use crate::access::{Action, Actor, Scope};
use crate::entity::{attendances, format_date};
use crate::errors::Result;
use crate::models::FieldErrors;
use crate::models::attendance::entities::{Attendance, AttendanceStatus};
use crate::models::attendance::requests::{CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::models::users::entities::UserRole;

pub struct AttendanceResource;

impl CrudResource for AttendanceResource {
    type Entity = attendances::Entity;
    type Model = attendances::Model;
    type ActiveModel = attendances::ActiveModel;
    type Create = CreateAttendanceRequest;
    type Update = UpdateAttendanceRequest;
    type Output = Attendance;

    const NAME: &'static str = "Attendance";
    const PATH: &'static str = "attendance";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["student_id", "date"];

    fn id_column() -> attendances::Column {
        attendances::Column::Id
    }

    fn order(select: Select<attendances::Entity>) -> Select<attendances::Entity> {
        select
            .order_by_desc(attendances::Column::Date)
            .order_by_asc(attendances::Column::Id)
    }

    // 学生看到自己的记录，教师看到自己登记的记录
    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Student => Scope::with_profile(actor.student(), |student| {
                Scope::only(Condition::all().add(attendances::Column::StudentId.eq(student.id)))
            }),
            UserRole::Teacher => Scope::with_profile(actor.teacher(), |teacher| {
                Scope::only(Condition::all().add(attendances::Column::MarkedBy.eq(teacher.id)))
            }),
            _ => Scope::All,
        }
    }

    fn permits(actor: &Actor, _action: Action) -> bool {
        staff_may_write(actor)
    }

    fn validate_create(actor: &Actor, req: &CreateAttendanceRequest) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if actor.is_administrator() {
            errors.require("marked_by", &req.marked_by);
        }
        errors
    }

    fn new_model(
        actor: &Actor,
        req: CreateAttendanceRequest,
        _now: i64,
    ) -> Result<attendances::ActiveModel> {
        let marked_by = if actor.is_administrator() {
            owner_from_payload("marked_by", req.marked_by)?
        } else {
            require_teacher(actor)?.id
        };
        Ok(attendances::ActiveModel {
            student_id: Set(req.student_id),
            date: Set(format_date(req.date)),
            status: Set(req.status.unwrap_or(AttendanceStatus::Present).to_string()),
            marked_by: Set(marked_by),
            class_id: Set(req.class_id),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut attendances::ActiveModel,
        req: UpdateAttendanceRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(date) = req.date {
            model.date = Set(format_date(date));
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }
        if let Some(class_id) = req.class_id {
            model.class_id = Set(class_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::access::{Profile, tests::user_with_role};
    use crate::models::profiles::entities::Teacher;
    use crate::resources::active_value;

    fn request(marked_by: Option<i64>) -> CreateAttendanceRequest {
        CreateAttendanceRequest {
            student_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            status: None,
            marked_by,
            class_id: 3,
        }
    }

    #[test]
    fn test_teacher_marks_as_self() {
        let teacher = Actor::new(
            user_with_role(8, UserRole::Teacher),
            Profile::Teacher(Teacher {
                id: 5,
                user_id: 8,
                teacher_code: "T-5".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                qualifications: None,
            }),
        );
        let model = AttendanceResource::new_model(&teacher, request(Some(40)), 0).unwrap();
        assert_eq!(active_value(&model.marked_by), Some(&5));
        assert_eq!(active_value(&model.status).map(String::as_str), Some("present"));
        assert_eq!(
            active_value(&model.date).map(String::as_str),
            Some("2024-09-02")
        );
    }

    #[test]
    fn test_admin_must_name_marker() {
        let admin = Actor::new(user_with_role(1, UserRole::Admin), Profile::None);
        assert!(AttendanceResource::validate_create(&admin, &request(None)).contains("marked_by"));
        assert!(AttendanceResource::validate_create(&admin, &request(Some(5))).is_empty());
    }

    #[test]
    fn test_parent_cannot_write() {
        let parent = Actor::new(user_with_role(2, UserRole::Parent), Profile::None);
        assert!(!AttendanceResource::permits(&parent, Action::Create));
    }
}
