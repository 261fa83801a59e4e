use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryOrder, Select, Set};

use super::academics::class_of_student;
use super::{
    CrudResource, active_value, owner_from_payload, require_student, require_teacher,
    staff_may_write,
};
use crate::access::{Action, Actor, Scope};
use crate::entity::{assessments, questions, submissions};
use crate::errors::Result;
use crate::models::FieldErrors;
use crate::models::assessments::entities::{Assessment, Question, QuestionType, Submission};
use crate::models::assessments::requests::{
    CreateAssessmentRequest, CreateQuestionRequest, CreateSubmissionRequest,
    DEFAULT_DURATION_MINUTES, UpdateAssessmentRequest, UpdateQuestionRequest,
    UpdateSubmissionRequest,
};
use crate::models::users::entities::UserRole;

/// 教师布置的测评
fn assessments_of_teacher(teacher_id: i64) -> sea_orm::sea_query::SelectStatement {
    Query::select()
        .column(assessments::Column::Id)
        .from(assessments::Entity)
        .and_where(assessments::Column::TeacherId.eq(teacher_id))
        .to_owned()
}

pub struct AssessmentResource;

impl CrudResource for AssessmentResource {
    type Entity = assessments::Entity;
    type Model = assessments::Model;
    type ActiveModel = assessments::ActiveModel;
    type Create = CreateAssessmentRequest;
    type Update = UpdateAssessmentRequest;
    type Output = Assessment;

    const NAME: &'static str = "Assessment";
    const PATH: &'static str = "assessments";

    fn id_column() -> assessments::Column {
        assessments::Column::Id
    }

    fn order(select: Select<assessments::Entity>) -> Select<assessments::Entity> {
        select
            .order_by_asc(assessments::Column::ScheduledDate)
            .order_by_asc(assessments::Column::Id)
    }

    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Student => Scope::with_profile(actor.student(), |student| {
                Scope::only(Condition::all().add(
                    assessments::Column::ClassId
                        .in_subquery(class_of_student(&student.grade, &student.section)),
                ))
            }),
            UserRole::Teacher => Scope::with_profile(actor.teacher(), |teacher| {
                Scope::only(Condition::all().add(assessments::Column::TeacherId.eq(teacher.id)))
            }),
            _ => Scope::All,
        }
    }

    fn permits(actor: &Actor, _action: Action) -> bool {
        staff_may_write(actor)
    }

    fn validate_create(actor: &Actor, req: &CreateAssessmentRequest) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if actor.is_administrator() {
            errors.require("teacher_id", &req.teacher_id);
        }
        errors
    }

    fn validate(model: &assessments::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = active_value(&model.title) {
            errors.not_blank("title", title);
        }
        if let Some(duration) = active_value(&model.duration_minutes) {
            errors.positive("duration_minutes", *duration);
        }
        if let Some(total) = active_value(&model.total_marks) {
            errors.positive("total_marks", *total);
        }
        errors
    }

    // 教师创建时归属强制为本人档案
    fn new_model(
        actor: &Actor,
        req: CreateAssessmentRequest,
        now: i64,
    ) -> Result<assessments::ActiveModel> {
        let teacher_id = if actor.is_administrator() {
            owner_from_payload("teacher_id", req.teacher_id)?
        } else {
            require_teacher(actor)?.id
        };
        Ok(assessments::ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            assessment_type: Set(req.assessment_type.to_string()),
            subject_id: Set(req.subject_id),
            class_id: Set(req.class_id),
            teacher_id: Set(teacher_id),
            scheduled_date: Set(req.scheduled_date.timestamp()),
            duration_minutes: Set(req.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES)),
            total_marks: Set(req.total_marks),
            created_date: Set(now),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut assessments::ActiveModel,
        req: UpdateAssessmentRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(description) = req.description {
            model.description = Set(description);
        }
        if let Some(kind) = req.assessment_type {
            model.assessment_type = Set(kind.to_string());
        }
        if let Some(subject_id) = req.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(class_id) = req.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(scheduled) = req.scheduled_date {
            model.scheduled_date = Set(scheduled.timestamp());
        }
        if let Some(duration) = req.duration_minutes {
            model.duration_minutes = Set(duration);
        }
        if let Some(total) = req.total_marks {
            model.total_marks = Set(total);
        }
        Ok(())
    }
}

pub struct QuestionResource;

impl CrudResource for QuestionResource {
    type Entity = questions::Entity;
    type Model = questions::Model;
    type ActiveModel = questions::ActiveModel;
    type Create = CreateQuestionRequest;
    type Update = UpdateQuestionRequest;
    type Output = Question;

    const NAME: &'static str = "Question";
    const PATH: &'static str = "questions";

    fn id_column() -> questions::Column {
        questions::Column::Id
    }

    // 教师只能修改自己测评下的题目
    fn write_scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Teacher => Scope::with_profile(actor.teacher(), |teacher| {
                Scope::only(
                    Condition::all().add(
                        questions::Column::AssessmentId
                            .in_subquery(assessments_of_teacher(teacher.id)),
                    ),
                )
            }),
            _ => Self::scope(actor),
        }
    }

    fn permits(actor: &Actor, _action: Action) -> bool {
        staff_may_write(actor)
    }

    // 选择题必须有四个选项和答案
    fn validate(model: &questions::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(text) = active_value(&model.question_text) {
            errors.not_blank("question_text", text);
        }
        if let Some(marks) = active_value(&model.marks) {
            errors.positive("marks", *marks);
        }
        let is_mcq = active_value(&model.question_type)
            .is_some_and(|kind| kind == QuestionType::Mcq.as_str());
        if is_mcq {
            for (field, option) in [
                ("option_a", &model.option_a),
                ("option_b", &model.option_b),
                ("option_c", &model.option_c),
                ("option_d", &model.option_d),
            ] {
                let filled = active_value(option)
                    .and_then(|v| v.as_deref())
                    .is_some_and(|v| !v.trim().is_empty());
                if !filled {
                    errors.add(field, "This field is required for multiple choice questions.");
                }
            }
            if active_value(&model.correct_answer).and_then(|v| v.as_ref()).is_none() {
                errors.add(
                    "correct_answer",
                    "This field is required for multiple choice questions.",
                );
            }
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateQuestionRequest,
        _now: i64,
    ) -> Result<questions::ActiveModel> {
        Ok(questions::ActiveModel {
            assessment_id: Set(req.assessment_id),
            question_text: Set(req.question_text),
            question_type: Set(req.question_type.to_string()),
            marks: Set(req.marks),
            option_a: Set(req.option_a),
            option_b: Set(req.option_b),
            option_c: Set(req.option_c),
            option_d: Set(req.option_d),
            correct_answer: Set(req.correct_answer.map(|a| a.to_string())),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut questions::ActiveModel,
        req: UpdateQuestionRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(text) = req.question_text {
            model.question_text = Set(text);
        }
        if let Some(kind) = req.question_type {
            model.question_type = Set(kind.to_string());
        }
        if let Some(marks) = req.marks {
            model.marks = Set(marks);
        }
        if let Some(option) = req.option_a {
            model.option_a = Set(option);
        }
        if let Some(option) = req.option_b {
            model.option_b = Set(option);
        }
        if let Some(option) = req.option_c {
            model.option_c = Set(option);
        }
        if let Some(option) = req.option_d {
            model.option_d = Set(option);
        }
        if let Some(answer) = req.correct_answer {
            model.correct_answer = Set(answer.map(|a| a.to_string()));
        }
        Ok(())
    }
}

pub struct SubmissionResource;

#[async_trait::async_trait]
impl CrudResource for SubmissionResource {
    type Entity = submissions::Entity;
    type Model = submissions::Model;
    type ActiveModel = submissions::ActiveModel;
    type Create = CreateSubmissionRequest;
    type Update = UpdateSubmissionRequest;
    type Output = Submission;

    const NAME: &'static str = "Submission";
    const PATH: &'static str = "submissions";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["assessment_id", "student_id"];

    fn id_column() -> submissions::Column {
        submissions::Column::Id
    }

    fn order(select: Select<submissions::Entity>) -> Select<submissions::Entity> {
        select
            .order_by_desc(submissions::Column::SubmittedAt)
            .order_by_desc(submissions::Column::Id)
    }

    // 学生看到自己的提交，教师看到自己布置的测评下的提交
    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Student => Scope::with_profile(actor.student(), |student| {
                Scope::only(Condition::all().add(submissions::Column::StudentId.eq(student.id)))
            }),
            UserRole::Teacher => Scope::with_profile(actor.teacher(), |teacher| {
                Scope::only(
                    Condition::all().add(
                        submissions::Column::AssessmentId
                            .in_subquery(assessments_of_teacher(teacher.id)),
                    ),
                )
            }),
            _ => Scope::All,
        }
    }

    // 学生提交，教师批改
    fn permits(actor: &Actor, action: Action) -> bool {
        if actor.is_administrator() {
            return true;
        }
        match action {
            Action::Create => actor.role() == UserRole::Student,
            Action::Update => actor.role() == UserRole::Teacher,
            Action::Delete => false,
        }
    }

    fn validate_create(actor: &Actor, req: &CreateSubmissionRequest) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if actor.is_administrator() {
            errors.require("student_id", &req.student_id);
        }
        errors
    }

    fn validate(model: &submissions::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(Some(marks)) = active_value(&model.marks_obtained) {
            errors.non_negative("marks_obtained", f64::from(*marks));
        }
        errors
    }

    // 分数不能超过测评总分
    async fn validate_related(
        db: &DatabaseConnection,
        model: &submissions::ActiveModel,
    ) -> Result<FieldErrors> {
        let mut errors = FieldErrors::new();
        let (Some(Some(marks)), Some(assessment_id)) = (
            active_value(&model.marks_obtained),
            active_value(&model.assessment_id),
        ) else {
            return Ok(errors);
        };
        if let Some(assessment) = assessments::Entity::find_by_id(*assessment_id).one(db).await?
            && *marks > assessment.total_marks
        {
            errors.add(
                "marks_obtained",
                format!(
                    "Ensure this value is less than or equal to {}.",
                    assessment.total_marks
                ),
            );
        }
        Ok(errors)
    }

    fn new_model(
        actor: &Actor,
        req: CreateSubmissionRequest,
        now: i64,
    ) -> Result<submissions::ActiveModel> {
        // 批改字段只有管理员能在创建时填写，学生提交时一律留空
        if !actor.is_administrator() {
            return Ok(submissions::ActiveModel {
                assessment_id: Set(req.assessment_id),
                student_id: Set(require_student(actor)?.id),
                submitted_at: Set(now),
                marks_obtained: Set(None),
                grade: Set(None),
                feedback: Set(None),
                ..Default::default()
            });
        }
        Ok(submissions::ActiveModel {
            assessment_id: Set(req.assessment_id),
            student_id: Set(owner_from_payload("student_id", req.student_id)?),
            submitted_at: Set(now),
            marks_obtained: Set(req.marks_obtained),
            grade: Set(req.grade),
            feedback: Set(req.feedback),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut submissions::ActiveModel,
        req: UpdateSubmissionRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(marks) = req.marks_obtained {
            model.marks_obtained = Set(marks);
        }
        if let Some(grade) = req.grade {
            model.grade = Set(grade);
        }
        if let Some(feedback) = req.feedback {
            model.feedback = Set(feedback);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Profile, tests::{student_actor, user_with_role}};
    use crate::models::assessments::entities::AnswerOption;

    fn mcq(options: [Option<&str>; 4], answer: Option<AnswerOption>) -> questions::ActiveModel {
        let admin = Actor::new(user_with_role(1, UserRole::Admin), Profile::None);
        let [a, b, c, d] = options.map(|o| o.map(str::to_string));
        let req = CreateQuestionRequest {
            assessment_id: 1,
            question_text: "2 + 2 = ?".to_string(),
            question_type: QuestionType::Mcq,
            marks: 1,
            option_a: a,
            option_b: b,
            option_c: c,
            option_d: d,
            correct_answer: answer,
        };
        QuestionResource::new_model(&admin, req, 0).unwrap()
    }

    #[test]
    fn test_mcq_requires_four_options_and_answer() {
        let model = mcq([Some("3"), Some("4"), None, Some(" ")], None);
        let errors = QuestionResource::validate(&model);
        assert!(errors.contains("option_c"));
        assert!(errors.contains("option_d"));
        assert!(errors.contains("correct_answer"));
        assert!(!errors.contains("option_a"));

        let model = mcq([Some("3"), Some("4"), Some("5"), Some("6")], Some(AnswerOption::B));
        assert!(QuestionResource::validate(&model).is_empty());
    }

    #[test]
    fn test_essay_needs_no_options() {
        let mut model = mcq([None, None, None, None], None);
        model.question_type = Set(QuestionType::Essay.to_string());
        assert!(QuestionResource::validate(&model).is_empty());
    }

    #[test]
    fn test_student_submission_forces_owner() {
        let student = student_actor(3, 21, "Grade 2", "B");
        let req = CreateSubmissionRequest {
            assessment_id: 4,
            student_id: Some(999),
            marks_obtained: None,
            grade: None,
            feedback: None,
        };
        let model = SubmissionResource::new_model(&student, req, 77).unwrap();
        assert_eq!(active_value(&model.student_id), Some(&21));
        assert_eq!(active_value(&model.submitted_at), Some(&77));
    }

    #[test]
    fn test_student_cannot_grade_own_submission() {
        let student = student_actor(3, 21, "Grade 2", "B");
        let req = CreateSubmissionRequest {
            assessment_id: 4,
            student_id: None,
            marks_obtained: Some(1000),
            grade: Some("A+".to_string()),
            feedback: Some("Perfect".to_string()),
        };
        let model = SubmissionResource::new_model(&student, req, 77).unwrap();
        assert_eq!(active_value(&model.marks_obtained), Some(&None));
        assert_eq!(active_value(&model.grade), Some(&None));
        assert_eq!(active_value(&model.feedback), Some(&None));
    }

    #[test]
    fn test_submission_permissions() {
        let student = student_actor(3, 21, "Grade 2", "B");
        let teacher = Actor::new(user_with_role(4, UserRole::Teacher), Profile::None);
        assert!(SubmissionResource::permits(&student, Action::Create));
        assert!(!SubmissionResource::permits(&student, Action::Update));
        assert!(SubmissionResource::permits(&teacher, Action::Update));
        assert!(!SubmissionResource::permits(&teacher, Action::Delete));
    }
}
