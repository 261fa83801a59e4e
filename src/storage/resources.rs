//! 通用资源的数据库操作
//!
//! 所有查询都带上调用者的数据范围，范围为空时直接返回空结果而不访问数据库。

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Select,
};

use crate::access::Scope;
use crate::errors::Result;
use crate::models::{PaginatedResponse, PaginationInfo};
use crate::resources::CrudResource;

fn scoped<R: CrudResource>(scope: &Scope) -> Select<R::Entity> {
    let select = R::Entity::find();
    match scope.condition() {
        Some(condition) => select.filter(condition),
        None => select,
    }
}

/// 分页列出调用者可见的记录
pub async fn list<R: CrudResource>(
    db: &DatabaseConnection,
    scope: &Scope,
    page: u64,
    size: u64,
) -> Result<PaginatedResponse<R::Output>> {
    if scope.is_empty() {
        return Ok(PaginatedResponse {
            items: Vec::new(),
            pagination: PaginationInfo::new(page, size, 0, 0),
        });
    }

    let paginator = R::order(scoped::<R>(scope)).paginate(db, size);
    let total = paginator.num_items().await?;
    let pages = paginator.num_pages().await?;
    let models = paginator.fetch_page(page - 1).await?;

    Ok(PaginatedResponse {
        items: models.into_iter().map(R::Output::from).collect(),
        pagination: PaginationInfo::new(page, size, total, pages),
    })
}

/// 按 ID 查找调用者可见的记录
pub async fn find<R: CrudResource>(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
) -> Result<Option<R::Model>> {
    if scope.is_empty() {
        return Ok(None);
    }
    let model = scoped::<R>(scope)
        .filter(R::id_column().eq(id))
        .one(db)
        .await?;
    Ok(model)
}

pub async fn insert<R: CrudResource>(
    db: &DatabaseConnection,
    model: R::ActiveModel,
) -> Result<R::Model> {
    Ok(model.insert(db).await?)
}

/// 写回修改，没有字段变化时返回原记录
pub async fn update<R: CrudResource>(
    db: &DatabaseConnection,
    original: R::Model,
    model: R::ActiveModel,
) -> Result<R::Model> {
    if !model.is_changed() {
        return Ok(original);
    }
    Ok(model.update(db).await?)
}

pub async fn delete<R: CrudResource>(db: &DatabaseConnection, id: i64) -> Result<bool> {
    let result = R::Entity::delete_many()
        .filter(R::id_column().eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use sea_orm::Set;

    use super::*;
    use crate::access::{Actor, Profile};
    use crate::entity::{
        academic_years, classes, contents, fee_payments, fee_structures, parents, students,
        subjects, timetables, users,
    };
    use crate::errors::SchoolError;
    use crate::models::users::entities::UserRole;
    use crate::resources::{
        ContentResource, FeePaymentResource, StudentResource, SubmissionResource,
        TimetableResource,
    };
    use crate::storage::sea_orm_storage::testing::{memory_db, seed_user};

    async fn seed_class(db: &DatabaseConnection, grade: &str, section: &str) -> i64 {
        seed_class_with_year(db, grade, section).await.0
    }

    /// 返回 (class_id, academic_year_id)
    async fn seed_class_with_year(
        db: &DatabaseConnection,
        grade: &str,
        section: &str,
    ) -> (i64, i64) {
        let year = academic_years::ActiveModel {
            name: Set(format!("{grade}-{section}")),
            start_date: Set("2024-09-01".to_string()),
            end_date: Set("2025-06-30".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let class = classes::ActiveModel {
            grade: Set(grade.to_string()),
            section: Set(section.to_string()),
            academic_year_id: Set(year.id),
            class_teacher_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        (class.id, year.id)
    }

    async fn seed_student(
        db: &DatabaseConnection,
        username: &str,
        grade: &str,
        section: &str,
        parent_id: Option<i64>,
    ) -> (users::Model, students::Model) {
        let user = seed_user(db, username, UserRole::Student).await;
        let student = students::ActiveModel {
            user_id: Set(user.id),
            student_code: Set(format!("S-{username}")),
            enrollment_date: Set("2024-09-01".to_string()),
            grade: Set(grade.to_string()),
            section: Set(section.to_string()),
            parent_id: Set(parent_id),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        (user, student)
    }

    async fn seed_subject(db: &DatabaseConnection, code: &str) -> i64 {
        subjects::ActiveModel {
            name: Set(code.to_string()),
            code: Set(code.to_string()),
            description: Set(None),
            grade: Set("Grade 1".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    async fn seed_period(db: &DatabaseConnection, class_id: i64, subject_id: i64, period: i32) {
        timetables::ActiveModel {
            class_id: Set(class_id),
            subject_id: Set(subject_id),
            day: Set("monday".to_string()),
            period: Set(period),
            start_time: Set("08:00".to_string()),
            end_time: Set("08:45".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[actix_web::test]
    async fn test_student_timetable_limited_to_own_class() {
        let db = memory_db().await;
        let own_class = seed_class(&db, "Grade 1", "A").await;
        let other_class = seed_class(&db, "Grade 1", "B").await;
        let subject = seed_subject(&db, "MATH").await;
        seed_period(&db, own_class, subject, 1).await;
        seed_period(&db, own_class, subject, 2).await;
        seed_period(&db, other_class, subject, 1).await;

        let (user, student) = seed_student(&db, "student01", "Grade 1", "A", None).await;
        let actor = Actor::new(user.into_user(), Profile::Student(student.into()));
        let page = list::<TimetableResource>(&db, &TimetableResource::scope(&actor), 1, 10)
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 2);
        assert!(page.items.iter().all(|t| t.class_id == own_class));
    }

    #[actix_web::test]
    async fn test_student_without_profile_gets_empty_timetable() {
        let db = memory_db().await;
        let class_id = seed_class(&db, "Grade 1", "A").await;
        let subject = seed_subject(&db, "MATH").await;
        seed_period(&db, class_id, subject, 1).await;

        let user = seed_user(&db, "student02", UserRole::Student).await;
        let actor = Actor::new(user.into_user(), Profile::None);
        let scope = TimetableResource::scope(&actor);
        let page = list::<TimetableResource>(&db, &scope, 1, 10).await.unwrap();
        assert!(page.items.is_empty());
        assert!(find::<TimetableResource>(&db, &scope, 1).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_parent_sees_only_own_children_payments() {
        let db = memory_db().await;
        let parent_user = seed_user(&db, "parent01", UserRole::Parent).await;
        let parent = parents::ActiveModel {
            user_id: Set(parent_user.id),
            parent_code: Set("P-01".to_string()),
            occupation: Set(None),
            relationship_to_student: Set("mother".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let (_, child) = seed_student(&db, "child01", "Grade 2", "A", Some(parent.id)).await;
        let (_, other) = seed_student(&db, "other01", "Grade 2", "A", None).await;

        let (_, year_id) = seed_class_with_year(&db, "Grade 2", "A").await;
        let fee = fee_structures::ActiveModel {
            academic_year_id: Set(year_id),
            fee_type: Set("tuition".to_string()),
            grade: Set("Grade 2".to_string()),
            amount: Set(500.0),
            due_date: Set("2024-10-01".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        for student_id in [child.id, other.id] {
            fee_payments::ActiveModel {
                student_id: Set(student_id),
                fee_structure_id: Set(fee.id),
                amount_paid: Set(200.0),
                payment_date: Set("2024-09-15".to_string()),
                payment_method: Set("cash".to_string()),
                transaction_id: Set(None),
                is_paid: Set(false),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let actor = Actor::new(parent_user.into_user(), Profile::Parent(parent.into()));
        let page = list::<FeePaymentResource>(&db, &FeePaymentResource::scope(&actor), 1, 10)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].student_id, child.id);
    }

    #[actix_web::test]
    async fn test_duplicate_submission_is_conflict() {
        use crate::entity::{assessments, submissions, teachers};

        let db = memory_db().await;
        let class_id = seed_class(&db, "Grade 3", "A").await;
        let subject_id = seed_subject(&db, "SCI").await;
        let teacher_user = seed_user(&db, "teacher01", UserRole::Teacher).await;
        let teacher = teachers::ActiveModel {
            user_id: Set(teacher_user.id),
            teacher_code: Set("T-01".to_string()),
            hire_date: Set("2020-01-01".to_string()),
            qualifications: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let assessment = assessments::ActiveModel {
            title: Set("Quiz 1".to_string()),
            description: Set(None),
            assessment_type: Set("quiz".to_string()),
            subject_id: Set(subject_id),
            class_id: Set(class_id),
            teacher_id: Set(teacher.id),
            scheduled_date: Set(1_725_000_000),
            duration_minutes: Set(60),
            total_marks: Set(10),
            created_date: Set(1_724_000_000),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let (_, student) = seed_student(&db, "student03", "Grade 3", "A", None).await;

        let submission = || submissions::ActiveModel {
            assessment_id: Set(assessment.id),
            student_id: Set(student.id),
            submitted_at: Set(1_725_000_100),
            marks_obtained: Set(None),
            grade: Set(None),
            feedback: Set(None),
            ..Default::default()
        };
        insert::<SubmissionResource>(&db, submission()).await.unwrap();
        let err = insert::<SubmissionResource>(&db, submission())
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[actix_web::test]
    async fn test_deleting_parent_clears_children_link() {
        let db = memory_db().await;
        let parent_user = seed_user(&db, "parent02", UserRole::Parent).await;
        let parent = parents::ActiveModel {
            user_id: Set(parent_user.id),
            parent_code: Set("P-02".to_string()),
            occupation: Set(None),
            relationship_to_student: Set("father".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let (_, child) = seed_student(&db, "child02", "Grade 1", "A", Some(parent.id)).await;

        assert!(delete::<crate::resources::ParentResource>(&db, parent.id).await.unwrap());
        let child = find::<StudentResource>(&db, &Scope::All, child.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(child.parent_id, None);
    }

    #[actix_web::test]
    async fn test_unchanged_update_returns_original() {
        let db = memory_db().await;
        let subject_id = seed_subject(&db, "ART").await;
        let original = subjects::Entity::find_by_id(subject_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        let active: subjects::ActiveModel = original.clone().into();
        let updated = update::<crate::resources::SubjectResource>(&db, original.clone(), active)
            .await
            .unwrap();
        assert_eq!(updated, original);
    }

    #[actix_web::test]
    async fn test_content_student_scope_by_grade() {
        let db = memory_db().await;
        let subject_id = seed_subject(&db, "ENG").await;
        let teacher_user = seed_user(&db, "teacher02", UserRole::Teacher).await;
        let teacher = crate::entity::teachers::ActiveModel {
            user_id: Set(teacher_user.id),
            teacher_code: Set("T-02".to_string()),
            hire_date: Set("2021-01-01".to_string()),
            qualifications: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        for (title, grade) in [("Phonics", "Grade 1"), ("Essays", "Grade 5")] {
            contents::ActiveModel {
                title: Set(title.to_string()),
                description: Set(None),
                content_type: Set("pdf".to_string()),
                file: Set(format!("content/{title}.pdf")),
                subject_id: Set(subject_id),
                grade: Set(grade.to_string()),
                chapter: Set(None),
                uploaded_by: Set(teacher.id),
                upload_date: Set(1_725_000_000),
                is_homework: Set(false),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let (user, student) = seed_student(&db, "student04", "Grade 1", "B", None).await;
        let actor = Actor::new(user.into_user(), Profile::Student(student.into()));
        let page = list::<ContentResource>(&db, &ContentResource::scope(&actor), 1, 10)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Phonics");
    }

    async fn seed_teacher(db: &DatabaseConnection, username: &str) -> (users::Model, i64) {
        let user = seed_user(db, username, UserRole::Teacher).await;
        let teacher = crate::entity::teachers::ActiveModel {
            user_id: Set(user.id),
            teacher_code: Set(format!("T-{username}")),
            hire_date: Set("2020-01-01".to_string()),
            qualifications: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        (user, teacher.id)
    }

    async fn teacher_actor(db: &DatabaseConnection, user: users::Model, teacher_id: i64) -> Actor {
        let teacher = crate::entity::teachers::Entity::find_by_id(teacher_id)
            .one(db)
            .await
            .unwrap()
            .unwrap();
        Actor::new(user.into_user(), Profile::Teacher(teacher.into()))
    }

    #[actix_web::test]
    async fn test_teacher_writes_only_own_content_and_questions() {
        use crate::entity::{assessments, questions};
        use crate::resources::QuestionResource;

        let db = memory_db().await;
        let subject_id = seed_subject(&db, "HIST").await;
        let class_id = seed_class(&db, "Grade 4", "A").await;
        let (owner_user, owner_id) = seed_teacher(&db, "teacher03").await;
        let (other_user, other_id) = seed_teacher(&db, "teacher04").await;

        let content = contents::ActiveModel {
            title: Set("Pyramids".to_string()),
            description: Set(None),
            content_type: Set("pdf".to_string()),
            file: Set("content/pyramids.pdf".to_string()),
            subject_id: Set(subject_id),
            grade: Set("Grade 4".to_string()),
            chapter: Set(None),
            uploaded_by: Set(owner_id),
            upload_date: Set(1_725_000_000),
            is_homework: Set(false),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let assessment = assessments::ActiveModel {
            title: Set("History quiz".to_string()),
            description: Set(None),
            assessment_type: Set("quiz".to_string()),
            subject_id: Set(subject_id),
            class_id: Set(class_id),
            teacher_id: Set(owner_id),
            scheduled_date: Set(1_725_000_000),
            duration_minutes: Set(30),
            total_marks: Set(10),
            created_date: Set(1_724_000_000),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let question = questions::ActiveModel {
            assessment_id: Set(assessment.id),
            question_text: Set("Who built the pyramids?".to_string()),
            question_type: Set("essay".to_string()),
            marks: Set(5),
            option_a: Set(None),
            option_b: Set(None),
            option_c: Set(None),
            option_d: Set(None),
            correct_answer: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let owner = teacher_actor(&db, owner_user, owner_id).await;
        let other = teacher_actor(&db, other_user, other_id).await;

        // 其他教师仍可读取，但不能修改
        assert!(find::<ContentResource>(&db, &ContentResource::scope(&other), content.id)
            .await
            .unwrap()
            .is_some());
        assert!(find::<ContentResource>(&db, &ContentResource::write_scope(&other), content.id)
            .await
            .unwrap()
            .is_none());
        assert!(find::<ContentResource>(&db, &ContentResource::write_scope(&owner), content.id)
            .await
            .unwrap()
            .is_some());

        let other_scope = QuestionResource::write_scope(&other);
        assert!(find::<QuestionResource>(&db, &other_scope, question.id)
            .await
            .unwrap()
            .is_none());
        let owner_scope = QuestionResource::write_scope(&owner);
        assert!(find::<QuestionResource>(&db, &owner_scope, question.id)
            .await
            .unwrap()
            .is_some());
    }

    #[actix_web::test]
    async fn test_submission_marks_capped_by_total() {
        use crate::entity::{assessments, submissions};

        let db = memory_db().await;
        let subject_id = seed_subject(&db, "GEO").await;
        let class_id = seed_class(&db, "Grade 5", "A").await;
        let (_, teacher_id) = seed_teacher(&db, "teacher05").await;
        let assessment = assessments::ActiveModel {
            title: Set("Maps".to_string()),
            description: Set(None),
            assessment_type: Set("exam".to_string()),
            subject_id: Set(subject_id),
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            scheduled_date: Set(1_725_000_000),
            duration_minutes: Set(45),
            total_marks: Set(20),
            created_date: Set(1_724_000_000),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let graded = |marks: i32| submissions::ActiveModel {
            assessment_id: Set(assessment.id),
            marks_obtained: Set(Some(marks)),
            ..Default::default()
        };
        let errors = SubmissionResource::validate_related(&db, &graded(21)).await.unwrap();
        assert_eq!(
            errors.messages("marks_obtained"),
            ["Ensure this value is less than or equal to 20.".to_string()]
        );
        let errors = SubmissionResource::validate_related(&db, &graded(20)).await.unwrap();
        assert!(errors.is_empty());
    }
}
