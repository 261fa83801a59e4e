use sea_orm::{ColumnTrait, Condition, Set};

use super::{CrudResource, active_value};
use crate::access::{Actor, Scope};
use crate::entity::{format_date, parents, students, teachers, to_datetime};
use crate::errors::Result;
use crate::models::FieldErrors;
use crate::models::profiles::entities::{Parent, Relationship, Student, Teacher};
use crate::models::profiles::requests::{
    CreateParentRequest, CreateStudentRequest, CreateTeacherRequest, UpdateParentRequest,
    UpdateStudentRequest, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;

fn today(now: i64) -> String {
    format_date(to_datetime(now).date_naive())
}

pub struct StudentResource;

impl CrudResource for StudentResource {
    type Entity = students::Entity;
    type Model = students::Model;
    type ActiveModel = students::ActiveModel;
    type Create = CreateStudentRequest;
    type Update = UpdateStudentRequest;
    type Output = Student;

    const NAME: &'static str = "Student";
    const PATH: &'static str = "students";

    fn id_column() -> students::Column {
        students::Column::Id
    }

    // 学生看到自己，家长看到子女
    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Student => Scope::with_profile(actor.student(), |student| {
                Scope::only(Condition::all().add(students::Column::Id.eq(student.id)))
            }),
            UserRole::Parent => Scope::with_profile(actor.parent(), |parent| {
                Scope::only(Condition::all().add(students::Column::ParentId.eq(parent.id)))
            }),
            _ => Scope::All,
        }
    }

    fn validate(model: &students::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("student_code", &model.student_code),
            ("grade", &model.grade),
            ("section", &model.section),
        ] {
            if let Some(value) = active_value(value) {
                errors.not_blank(field, value);
            }
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateStudentRequest,
        now: i64,
    ) -> Result<students::ActiveModel> {
        Ok(students::ActiveModel {
            user_id: Set(req.user_id),
            student_code: Set(req.student_code),
            enrollment_date: Set(req
                .enrollment_date
                .map(format_date)
                .unwrap_or_else(|| today(now))),
            grade: Set(req.grade),
            section: Set(req.section),
            parent_id: Set(req.parent_id),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut students::ActiveModel,
        req: UpdateStudentRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(code) = req.student_code {
            model.student_code = Set(code);
        }
        if let Some(date) = req.enrollment_date {
            model.enrollment_date = Set(format_date(date));
        }
        if let Some(grade) = req.grade {
            model.grade = Set(grade);
        }
        if let Some(section) = req.section {
            model.section = Set(section);
        }
        if let Some(parent_id) = req.parent_id {
            model.parent_id = Set(parent_id);
        }
        Ok(())
    }
}

pub struct TeacherResource;

impl CrudResource for TeacherResource {
    type Entity = teachers::Entity;
    type Model = teachers::Model;
    type ActiveModel = teachers::ActiveModel;
    type Create = CreateTeacherRequest;
    type Update = UpdateTeacherRequest;
    type Output = Teacher;

    const NAME: &'static str = "Teacher";
    const PATH: &'static str = "teachers";

    fn id_column() -> teachers::Column {
        teachers::Column::Id
    }

    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Teacher => Scope::with_profile(actor.teacher(), |teacher| {
                Scope::only(Condition::all().add(teachers::Column::Id.eq(teacher.id)))
            }),
            _ => Scope::All,
        }
    }

    fn validate(model: &teachers::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(code) = active_value(&model.teacher_code) {
            errors.not_blank("teacher_code", code);
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateTeacherRequest,
        now: i64,
    ) -> Result<teachers::ActiveModel> {
        Ok(teachers::ActiveModel {
            user_id: Set(req.user_id),
            teacher_code: Set(req.teacher_code),
            hire_date: Set(req.hire_date.map(format_date).unwrap_or_else(|| today(now))),
            qualifications: Set(req.qualifications),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut teachers::ActiveModel,
        req: UpdateTeacherRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(code) = req.teacher_code {
            model.teacher_code = Set(code);
        }
        if let Some(date) = req.hire_date {
            model.hire_date = Set(format_date(date));
        }
        if let Some(qualifications) = req.qualifications {
            model.qualifications = Set(qualifications);
        }
        Ok(())
    }
}

pub struct ParentResource;

impl CrudResource for ParentResource {
    type Entity = parents::Entity;
    type Model = parents::Model;
    type ActiveModel = parents::ActiveModel;
    type Create = CreateParentRequest;
    type Update = UpdateParentRequest;
    type Output = Parent;

    const NAME: &'static str = "Parent";
    const PATH: &'static str = "parents";

    fn id_column() -> parents::Column {
        parents::Column::Id
    }

    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Parent => Scope::with_profile(actor.parent(), |parent| {
                Scope::only(Condition::all().add(parents::Column::Id.eq(parent.id)))
            }),
            _ => Scope::All,
        }
    }

    fn validate(model: &parents::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(code) = active_value(&model.parent_code) {
            errors.not_blank("parent_code", code);
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateParentRequest,
        _now: i64,
    ) -> Result<parents::ActiveModel> {
        Ok(parents::ActiveModel {
            user_id: Set(req.user_id),
            parent_code: Set(req.parent_code),
            occupation: Set(req.occupation),
            relationship_to_student: Set(req
                .relationship_to_student
                .unwrap_or(Relationship::Father)
                .to_string()),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut parents::ActiveModel,
        req: UpdateParentRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(code) = req.parent_code {
            model.parent_code = Set(code);
        }
        if let Some(occupation) = req.occupation {
            model.occupation = Set(occupation);
        }
        if let Some(relationship) = req.relationship_to_student {
            model.relationship_to_student = Set(relationship.to_string());
        }
        Ok(())
    }
}
