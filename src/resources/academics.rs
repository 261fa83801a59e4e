use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, Condition, QueryOrder, Select, Set};

use super::{CrudResource, active_value, owner_from_payload, require_teacher, staff_may_write};
use crate::access::{Action, Actor, Scope};
use crate::entity::{
    academic_years, class_subjects, classes, contents, format_date, subjects, teacher_subjects,
    timetables,
};
use crate::errors::Result;
use crate::models::FieldErrors;
use crate::models::academics::entities::{
    AcademicYear, Class, ClassSubject, Content, Subject, Timetable,
};
use crate::models::academics::requests::{
    CreateAcademicYearRequest, CreateClassRequest, CreateClassSubjectRequest,
    CreateContentRequest, CreateSubjectRequest, CreateTimetableRequest,
    UpdateAcademicYearRequest, UpdateClassRequest, UpdateClassSubjectRequest,
    UpdateContentRequest, UpdateSubjectRequest, UpdateTimetableRequest,
};
use crate::models::users::entities::UserRole;
use crate::utils::validate::validate_time_of_day;

/// 每天的课时数
pub const MIN_PERIOD: i32 = 1;
pub const MAX_PERIOD: i32 = 8;

/// 与学生同年级同班的班级
pub(crate) fn class_of_student(grade: &str, section: &str) -> sea_orm::sea_query::SelectStatement {
    Query::select()
        .column(classes::Column::Id)
        .from(classes::Entity)
        .and_where(classes::Column::Grade.eq(grade))
        .and_where(classes::Column::Section.eq(section))
        .to_owned()
}

pub struct AcademicYearResource;

impl CrudResource for AcademicYearResource {
    type Entity = academic_years::Entity;
    type Model = academic_years::Model;
    type ActiveModel = academic_years::ActiveModel;
    type Create = CreateAcademicYearRequest;
    type Update = UpdateAcademicYearRequest;
    type Output = AcademicYear;

    const NAME: &'static str = "Academic year";
    const PATH: &'static str = "academic-years";

    fn id_column() -> academic_years::Column {
        academic_years::Column::Id
    }

    fn validate(model: &academic_years::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(name) = active_value(&model.name) {
            errors.not_blank("name", name);
        }
        // 日期以 YYYY-MM-DD 存储，可直接按字符串比较
        if let (Some(start), Some(end)) = (
            active_value(&model.start_date),
            active_value(&model.end_date),
        ) && end <= start
        {
            errors.add("end_date", "End date must be after start date.");
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateAcademicYearRequest,
        _now: i64,
    ) -> Result<academic_years::ActiveModel> {
        Ok(academic_years::ActiveModel {
            name: Set(req.name),
            start_date: Set(format_date(req.start_date)),
            end_date: Set(format_date(req.end_date)),
            is_active: Set(req.is_active),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut academic_years::ActiveModel,
        req: UpdateAcademicYearRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(start) = req.start_date {
            model.start_date = Set(format_date(start));
        }
        if let Some(end) = req.end_date {
            model.end_date = Set(format_date(end));
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        Ok(())
    }
}

pub struct ClassResource;

impl CrudResource for ClassResource {
    type Entity = classes::Entity;
    type Model = classes::Model;
    type ActiveModel = classes::ActiveModel;
    type Create = CreateClassRequest;
    type Update = UpdateClassRequest;
    type Output = Class;

    const NAME: &'static str = "Class";
    const PATH: &'static str = "classes";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["grade", "section", "academic_year_id"];

    fn id_column() -> classes::Column {
        classes::Column::Id
    }

    fn validate(model: &classes::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(grade) = active_value(&model.grade) {
            errors.not_blank("grade", grade);
        }
        if let Some(section) = active_value(&model.section) {
            errors.not_blank("section", section);
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateClassRequest,
        _now: i64,
    ) -> Result<classes::ActiveModel> {
        Ok(classes::ActiveModel {
            grade: Set(req.grade),
            section: Set(req.section),
            academic_year_id: Set(req.academic_year_id),
            class_teacher_id: Set(req.class_teacher_id),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut classes::ActiveModel,
        req: UpdateClassRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(grade) = req.grade {
            model.grade = Set(grade);
        }
        if let Some(section) = req.section {
            model.section = Set(section);
        }
        if let Some(year) = req.academic_year_id {
            model.academic_year_id = Set(year);
        }
        if let Some(teacher) = req.class_teacher_id {
            model.class_teacher_id = Set(teacher);
        }
        Ok(())
    }
}

pub struct SubjectResource;

impl CrudResource for SubjectResource {
    type Entity = subjects::Entity;
    type Model = subjects::Model;
    type ActiveModel = subjects::ActiveModel;
    type Create = CreateSubjectRequest;
    type Update = UpdateSubjectRequest;
    type Output = Subject;

    const NAME: &'static str = "Subject";
    const PATH: &'static str = "subjects";

    fn id_column() -> subjects::Column {
        subjects::Column::Id
    }

    fn validate(model: &subjects::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(name) = active_value(&model.name) {
            errors.not_blank("name", name);
        }
        if let Some(code) = active_value(&model.code) {
            errors.not_blank("code", code);
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateSubjectRequest,
        _now: i64,
    ) -> Result<subjects::ActiveModel> {
        Ok(subjects::ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            grade: Set(req.grade),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut subjects::ActiveModel,
        req: UpdateSubjectRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(code) = req.code {
            model.code = Set(code);
        }
        if let Some(description) = req.description {
            model.description = Set(description);
        }
        if let Some(grade) = req.grade {
            model.grade = Set(grade);
        }
        Ok(())
    }
}

pub struct ClassSubjectResource;

impl CrudResource for ClassSubjectResource {
    type Entity = class_subjects::Entity;
    type Model = class_subjects::Model;
    type ActiveModel = class_subjects::ActiveModel;
    type Create = CreateClassSubjectRequest;
    type Update = UpdateClassSubjectRequest;
    type Output = ClassSubject;

    const NAME: &'static str = "Class subject";
    const PATH: &'static str = "class-subjects";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["class_id", "subject_id"];

    fn id_column() -> class_subjects::Column {
        class_subjects::Column::Id
    }

    fn new_model(
        _actor: &Actor,
        req: CreateClassSubjectRequest,
        _now: i64,
    ) -> Result<class_subjects::ActiveModel> {
        Ok(class_subjects::ActiveModel {
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut class_subjects::ActiveModel,
        req: UpdateClassSubjectRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(class_id) = req.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(subject_id) = req.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(teacher_id) = req.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        Ok(())
    }
}

pub struct TimetableResource;

impl CrudResource for TimetableResource {
    type Entity = timetables::Entity;
    type Model = timetables::Model;
    type ActiveModel = timetables::ActiveModel;
    type Create = CreateTimetableRequest;
    type Update = UpdateTimetableRequest;
    type Output = Timetable;

    const NAME: &'static str = "Timetable";
    const PATH: &'static str = "timetables";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["class_id", "day", "period"];

    fn id_column() -> timetables::Column {
        timetables::Column::Id
    }

    fn order(select: Select<timetables::Entity>) -> Select<timetables::Entity> {
        select
            .order_by_asc(timetables::Column::ClassId)
            .order_by_asc(timetables::Column::Id)
    }

    // 学生按所在年级与班级，教师按所授科目
    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Student => Scope::with_profile(actor.student(), |student| {
                Scope::only(Condition::all().add(
                    timetables::Column::ClassId
                        .in_subquery(class_of_student(&student.grade, &student.section)),
                ))
            }),
            UserRole::Teacher => Scope::with_profile(actor.teacher(), |teacher| {
                Scope::only(
                    Condition::all().add(
                        timetables::Column::SubjectId.in_subquery(
                            Query::select()
                                .column(teacher_subjects::Column::SubjectId)
                                .from(teacher_subjects::Entity)
                                .and_where(teacher_subjects::Column::TeacherId.eq(teacher.id))
                                .to_owned(),
                        ),
                    ),
                )
            }),
            _ => Scope::All,
        }
    }

    fn validate(model: &timetables::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(period) = active_value(&model.period) {
            errors.in_range("period", *period, MIN_PERIOD, MAX_PERIOD);
        }
        let start = active_value(&model.start_time);
        let end = active_value(&model.end_time);
        for (field, value) in [("start_time", start), ("end_time", end)] {
            if let Some(Err(msg)) = value.map(|v| validate_time_of_day(v)) {
                errors.add(field, msg);
            }
        }
        if !errors.contains("start_time")
            && !errors.contains("end_time")
            && let (Some(start), Some(end)) = (start, end)
            && end <= start
        {
            errors.add("end_time", "End time must be after start time.");
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateTimetableRequest,
        _now: i64,
    ) -> Result<timetables::ActiveModel> {
        Ok(timetables::ActiveModel {
            class_id: Set(req.class_id),
            day: Set(req.day.to_string()),
            period: Set(req.period),
            subject_id: Set(req.subject_id),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut timetables::ActiveModel,
        req: UpdateTimetableRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(class_id) = req.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(day) = req.day {
            model.day = Set(day.to_string());
        }
        if let Some(period) = req.period {
            model.period = Set(period);
        }
        if let Some(subject_id) = req.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(start) = req.start_time {
            model.start_time = Set(start);
        }
        if let Some(end) = req.end_time {
            model.end_time = Set(end);
        }
        Ok(())
    }
}

pub struct ContentResource;

impl CrudResource for ContentResource {
    type Entity = contents::Entity;
    type Model = contents::Model;
    type ActiveModel = contents::ActiveModel;
    type Create = CreateContentRequest;
    type Update = UpdateContentRequest;
    type Output = Content;

    const NAME: &'static str = "Content";
    const PATH: &'static str = "content";

    fn id_column() -> contents::Column {
        contents::Column::Id
    }

    fn order(select: Select<contents::Entity>) -> Select<contents::Entity> {
        select
            .order_by_desc(contents::Column::UploadDate)
            .order_by_desc(contents::Column::Id)
    }

    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Student => Scope::with_profile(actor.student(), |student| {
                Scope::only(
                    Condition::all().add(contents::Column::Grade.eq(student.grade.as_str())),
                )
            }),
            _ => Scope::All,
        }
    }

    fn write_scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Teacher => Scope::with_profile(actor.teacher(), |teacher| {
                Scope::only(Condition::all().add(contents::Column::UploadedBy.eq(teacher.id)))
            }),
            _ => Self::scope(actor),
        }
    }

    fn permits(actor: &Actor, _action: Action) -> bool {
        staff_may_write(actor)
    }

    fn validate_create(actor: &Actor, req: &CreateContentRequest) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if actor.is_administrator() {
            errors.require("uploaded_by", &req.uploaded_by);
        }
        errors
    }

    fn validate(model: &contents::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = active_value(&model.title) {
            errors.not_blank("title", title);
        }
        if let Some(file) = active_value(&model.file) {
            errors.not_blank("file", file);
        }
        errors
    }

    // 教师上传时归属强制为本人档案
    fn new_model(
        actor: &Actor,
        req: CreateContentRequest,
        now: i64,
    ) -> Result<contents::ActiveModel> {
        let uploaded_by = if actor.is_administrator() {
            owner_from_payload("uploaded_by", req.uploaded_by)?
        } else {
            require_teacher(actor)?.id
        };
        Ok(contents::ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            content_type: Set(req.content_type.to_string()),
            file: Set(req.file),
            subject_id: Set(req.subject_id),
            grade: Set(req.grade),
            chapter: Set(req.chapter),
            uploaded_by: Set(uploaded_by),
            upload_date: Set(now),
            is_homework: Set(req.is_homework),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut contents::ActiveModel,
        req: UpdateContentRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(description) = req.description {
            model.description = Set(description);
        }
        if let Some(content_type) = req.content_type {
            model.content_type = Set(content_type.to_string());
        }
        if let Some(file) = req.file {
            model.file = Set(file);
        }
        if let Some(subject_id) = req.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(grade) = req.grade {
            model.grade = Set(grade);
        }
        if let Some(chapter) = req.chapter {
            model.chapter = Set(chapter);
        }
        if let Some(is_homework) = req.is_homework {
            model.is_homework = Set(is_homework);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Profile, tests::{student_actor, user_with_role}};
    use crate::models::academics::entities::{ContentType, Weekday};
    use crate::models::profiles::entities::Teacher;
    use chrono::NaiveDate;

    fn timetable(period: i32, start: &str, end: &str) -> timetables::ActiveModel {
        let admin = Actor::new(user_with_role(1, UserRole::Admin), Profile::None);
        let req = CreateTimetableRequest {
            class_id: 1,
            day: Weekday::Monday,
            period,
            subject_id: 1,
            start_time: start.to_string(),
            end_time: end.to_string(),
        };
        TimetableResource::new_model(&admin, req, 0).unwrap()
    }

    fn content_request(uploaded_by: Option<i64>) -> CreateContentRequest {
        CreateContentRequest {
            title: "Fractions".to_string(),
            description: None,
            content_type: ContentType::Pdf,
            file: "content/fractions.pdf".to_string(),
            subject_id: 1,
            grade: "Grade 1".to_string(),
            chapter: None,
            uploaded_by,
            is_homework: false,
        }
    }

    #[test]
    fn test_period_out_of_range_rejected() {
        let errors = TimetableResource::validate(&timetable(9, "08:00", "08:45"));
        assert_eq!(
            errors.messages("period"),
            ["Ensure this value is between 1 and 8.".to_string()]
        );
        assert!(TimetableResource::validate(&timetable(0, "08:00", "08:45")).contains("period"));
        assert!(TimetableResource::validate(&timetable(8, "08:00", "08:45")).is_empty());
    }

    #[test]
    fn test_timetable_times() {
        assert!(TimetableResource::validate(&timetable(1, "8am", "08:45")).contains("start_time"));
        assert!(TimetableResource::validate(&timetable(1, "09:00", "08:45")).contains("end_time"));
    }

    #[test]
    fn test_academic_year_dates() {
        let admin = Actor::new(user_with_role(1, UserRole::Admin), Profile::None);
        let req = CreateAcademicYearRequest {
            name: "2024-2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            is_active: false,
        };
        let model = AcademicYearResource::new_model(&admin, req, 0).unwrap();
        assert!(AcademicYearResource::validate(&model).contains("end_date"));
    }

    #[test]
    fn test_teacher_upload_forces_owner() {
        let teacher = Actor::new(
            user_with_role(4, UserRole::Teacher),
            Profile::Teacher(Teacher {
                id: 12,
                user_id: 4,
                teacher_code: "T-12".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                qualifications: None,
            }),
        );
        let model = ContentResource::new_model(&teacher, content_request(Some(99)), 50).unwrap();
        assert_eq!(active_value(&model.uploaded_by), Some(&12));
        assert_eq!(active_value(&model.upload_date), Some(&50));
    }

    #[test]
    fn test_admin_upload_requires_owner() {
        let admin = Actor::new(user_with_role(1, UserRole::Admin), Profile::None);
        let errors = ContentResource::validate_create(&admin, &content_request(None));
        assert!(errors.contains("uploaded_by"));

        let orphan = Actor::new(user_with_role(5, UserRole::Teacher), Profile::None);
        let err = ContentResource::new_model(&orphan, content_request(None), 0).unwrap_err();
        assert_eq!(err.message(), "Teacher profile not found");
    }

    #[test]
    fn test_content_scope_for_students() {
        let student = student_actor(1, 2, "Grade 1", "A");
        assert!(matches!(ContentResource::scope(&student), Scope::Only(_)));
        let parent = Actor::new(user_with_role(3, UserRole::Parent), Profile::None);
        assert!(!ContentResource::permits(&parent, Action::Create));
    }

    #[test]
    fn test_update_clears_nullable_fields() {
        let mut class = classes::ActiveModel {
            class_teacher_id: Set(Some(4)),
            ..Default::default()
        };
        let req: UpdateClassRequest =
            serde_json::from_str(r#"{"class_teacher_id": null}"#).unwrap();
        ClassResource::apply_update(&mut class, req, 0).unwrap();
        assert_eq!(active_value(&class.class_teacher_id), Some(&None));

        let mut content = contents::ActiveModel {
            chapter: Set(Some("Chapter 1".to_string())),
            description: Set(Some("Intro".to_string())),
            ..Default::default()
        };
        let req: UpdateContentRequest = serde_json::from_str(r#"{"chapter": null}"#).unwrap();
        ContentResource::apply_update(&mut content, req, 0).unwrap();
        assert_eq!(active_value(&content.chapter), Some(&None));
        assert_eq!(
            active_value(&content.description),
            Some(&Some("Intro".to_string()))
        );
    }
}
