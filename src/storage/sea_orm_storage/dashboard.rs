//! 各角色看板的聚合查询

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::SeaOrmStorage;
use crate::access::Actor;
use crate::entity::{
    academic_years, announcements, assessments, attendances, classes, contents, fee_payments,
    parents, students, subjects, teachers, timetables,
};
use crate::errors::Result;
use crate::models::academics::entities::{Content, Timetable};
use crate::models::assessments::entities::Assessment;
use crate::models::attendance::entities::{AttendanceStatus, attendance_percentage};
use crate::models::communications::entities::Announcement;
use crate::models::dashboard::DASHBOARD_LIST_LIMIT;
use crate::models::dashboard::responses::{
    AdminDashboard, ChildAttendance, ParentDashboard, StudentDashboard, TeacherDashboard,
};
use crate::models::fees::entities::FeePayment;
use crate::models::profiles::entities::{ProfileInfo, Student};
use crate::models::users::entities::{User, UserRole};
use crate::resources::academics::class_of_student;
use crate::resources::communications::announcement_visibility;

impl SeaOrmStorage {
    async fn recent_announcements(&self, role: UserRole) -> Result<Vec<Announcement>> {
        let models = announcements::Entity::find()
            .filter(announcement_visibility(role))
            .order_by_desc(announcements::Column::CreatedDate)
            .order_by_desc(announcements::Column::Id)
            .limit(DASHBOARD_LIST_LIMIT)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Announcement::from).collect())
    }

    async fn upcoming_assessments(&self, filter: Condition, now: i64) -> Result<Vec<Assessment>> {
        let models = assessments::Entity::find()
            .filter(filter)
            .filter(assessments::Column::ScheduledDate.gte(now))
            .order_by_asc(assessments::Column::ScheduledDate)
            .limit(DASHBOARD_LIST_LIMIT)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Assessment::from).collect())
    }

    async fn recent_content(&self, filter: Condition) -> Result<Vec<Content>> {
        let models = contents::Entity::find()
            .filter(filter)
            .order_by_desc(contents::Column::UploadDate)
            .order_by_desc(contents::Column::Id)
            .limit(DASHBOARD_LIST_LIMIT)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Content::from).collect())
    }

    /// 学生出勤率，无记录时为 0
    pub(crate) async fn attendance_of(&self, student_id: i64) -> Result<f64> {
        let total = attendances::Entity::find()
            .filter(attendances::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await?;
        let present = attendances::Entity::find()
            .filter(attendances::Column::StudentId.eq(student_id))
            .filter(attendances::Column::Status.eq(AttendanceStatus::Present.as_str()))
            .count(&self.db)
            .await?;
        Ok(attendance_percentage(present, total))
    }

    pub async fn admin_dashboard_impl(&self, actor: &Actor) -> Result<AdminDashboard> {
        let active_academic_year = academic_years::Entity::find()
            .filter(academic_years::Column::IsActive.eq(true))
            .order_by_asc(academic_years::Column::Id)
            .one(&self.db)
            .await?
            .map(Into::into);

        Ok(AdminDashboard {
            total_students: students::Entity::find().count(&self.db).await?,
            total_teachers: teachers::Entity::find().count(&self.db).await?,
            total_parents: parents::Entity::find().count(&self.db).await?,
            total_classes: classes::Entity::find().count(&self.db).await?,
            total_subjects: subjects::Entity::find().count(&self.db).await?,
            active_academic_year,
            recent_announcements: self.recent_announcements(actor.role()).await?,
        })
    }

    pub async fn teacher_dashboard_impl(&self, user: &User) -> Result<Option<TeacherDashboard>> {
        let Some(teacher) = self.teacher_by_user(user.id).await? else {
            return Ok(None);
        };
        let now = chrono::Utc::now().timestamp();

        Ok(Some(TeacherDashboard {
            assigned_subjects: Self::subjects_of_teacher(&self.db, teacher.id).await?,
            upcoming_assessments: self
                .upcoming_assessments(
                    Condition::all().add(assessments::Column::TeacherId.eq(teacher.id)),
                    now,
                )
                .await?,
            recent_content: self
                .recent_content(Condition::all().add(contents::Column::UploadedBy.eq(teacher.id)))
                .await?,
            recent_announcements: self.recent_announcements(user.role).await?,
            teacher_info: ProfileInfo {
                profile: teacher.into(),
                user_details: user.clone(),
            },
        }))
    }

    pub async fn student_dashboard_impl(&self, user: &User) -> Result<Option<StudentDashboard>> {
        let Some(student) = self.student_by_user(user.id).await? else {
            return Ok(None);
        };
        let now = chrono::Utc::now().timestamp();

        let mut timetable: Vec<Timetable> = timetables::Entity::find()
            .filter(
                timetables::Column::ClassId
                    .in_subquery(class_of_student(&student.grade, &student.section)),
            )
            .all(&self.db)
            .await?
            .into_iter()
            .map(Timetable::from)
            .collect();
        timetable.sort_by_key(|entry| (entry.day.ordinal(), entry.period));

        Ok(Some(StudentDashboard {
            timetable,
            upcoming_assessments: self
                .upcoming_assessments(
                    Condition::all().add(
                        assessments::Column::ClassId
                            .in_subquery(class_of_student(&student.grade, &student.section)),
                    ),
                    now,
                )
                .await?,
            recent_content: self
                .recent_content(Condition::all().add(contents::Column::Grade.eq(&student.grade)))
                .await?,
            attendance_percentage: self.attendance_of(student.id).await?,
            recent_announcements: self.recent_announcements(user.role).await?,
            student_info: ProfileInfo {
                profile: student.into(),
                user_details: user.clone(),
            },
        }))
    }

    pub async fn parent_dashboard_impl(&self, user: &User) -> Result<Option<ParentDashboard>> {
        let Some(parent) = self.parent_by_user(user.id).await? else {
            return Ok(None);
        };

        let children: Vec<Student> = students::Entity::find()
            .filter(students::Column::ParentId.eq(parent.id))
            .order_by_asc(students::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Student::from)
            .collect();

        let mut children_attendance = Vec::with_capacity(children.len());
        for child in &children {
            children_attendance.push(ChildAttendance {
                student: child.clone(),
                attendance_percentage: self.attendance_of(child.id).await?,
            });
        }

        let child_ids: Vec<i64> = children.iter().map(|c| c.id).collect();
        let unpaid_fees = fee_payments::Entity::find()
            .filter(fee_payments::Column::StudentId.is_in(child_ids))
            .filter(fee_payments::Column::IsPaid.eq(false))
            .order_by_asc(fee_payments::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(FeePayment::from)
            .collect();

        Ok(Some(ParentDashboard {
            children,
            children_attendance,
            unpaid_fees,
            recent_announcements: self.recent_announcements(user.role).await?,
            parent_info: ProfileInfo {
                profile: parent.into(),
                user_details: user.clone(),
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

    use crate::access::{Actor, Profile};
    use crate::entity::{
        academic_years, announcements, attendances, classes, fee_payments, fee_structures,
        parents, students, teachers,
    };
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::testing::{memory_storage, seed_user};

    async fn seed_announcement(db: &DatabaseConnection, author: i64, audience: &str, at: i64) {
        announcements::ActiveModel {
            title: Set(format!("For {audience}")),
            content: Set("...".to_string()),
            created_by: Set(author),
            created_date: Set(at),
            target_audience: Set(audience.to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[actix_web::test]
    async fn test_student_dashboard_attendance() {
        let storage = memory_storage().await;
        let db = &storage.db;

        let year = academic_years::ActiveModel {
            name: Set("2024-2025".to_string()),
            start_date: Set("2024-09-01".to_string()),
            end_date: Set("2025-06-30".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let class = classes::ActiveModel {
            grade: Set("Grade 1".to_string()),
            section: Set("A".to_string()),
            academic_year_id: Set(year.id),
            class_teacher_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let teacher_user = seed_user(db, "teacher01", UserRole::Teacher).await;
        let teacher = teachers::ActiveModel {
            user_id: Set(teacher_user.id),
            teacher_code: Set("T-01".to_string()),
            hire_date: Set("2020-01-01".to_string()),
            qualifications: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let user = seed_user(db, "student_a", UserRole::Student).await;
        let student = students::ActiveModel {
            user_id: Set(user.id),
            student_code: Set("S-A".to_string()),
            enrollment_date: Set("2024-09-01".to_string()),
            grade: Set("Grade 1".to_string()),
            section: Set("A".to_string()),
            parent_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        for day in 1..=10 {
            let status = if day <= 8 { "present" } else { "absent" };
            attendances::ActiveModel {
                student_id: Set(student.id),
                date: Set(format!("2024-09-{day:02}")),
                status: Set(status.to_string()),
                marked_by: Set(teacher.id),
                class_id: Set(class.id),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap();
        }

        let dashboard = storage
            .student_dashboard_impl(&user.into_user())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(dashboard.attendance_percentage, 80.0);
        assert_eq!(dashboard.student_info.profile.id, student.id);
    }

    #[actix_web::test]
    async fn test_dashboard_without_profile() {
        let storage = memory_storage().await;
        let user = seed_user(&storage.db, "teacher02", UserRole::Teacher).await.into_user();
        assert!(storage.teacher_dashboard_impl(&user).await.unwrap().is_none());
        assert!(storage.student_dashboard_impl(&user).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_announcements_follow_audience() {
        let storage = memory_storage().await;
        let db = &storage.db;
        let admin = seed_user(db, "admin01", UserRole::Admin).await;
        seed_announcement(db, admin.id, "all", 1).await;
        seed_announcement(db, admin.id, "teachers", 2).await;
        seed_announcement(db, admin.id, "parents", 3).await;

        let parent_feed = storage.recent_announcements(UserRole::Parent).await.unwrap();
        let audiences: Vec<_> = parent_feed.iter().map(|a| a.target_audience.as_str()).collect();
        assert_eq!(audiences, vec!["parents", "all"]);

        let principal_feed = storage.recent_announcements(UserRole::Principal).await.unwrap();
        assert_eq!(principal_feed.len(), 1);

        let actor = Actor::new(admin.into_user(), Profile::None);
        let dashboard = storage.admin_dashboard_impl(&actor).await.unwrap();
        assert_eq!(dashboard.recent_announcements.len(), 3);
        assert!(dashboard.active_academic_year.is_none());
    }

    #[actix_web::test]
    async fn test_parent_dashboard_unpaid_fees() {
        let storage = memory_storage().await;
        let db = &storage.db;
        let parent_user = seed_user(db, "parent01", UserRole::Parent).await;
        let parent = parents::ActiveModel {
            user_id: Set(parent_user.id),
            parent_code: Set("P-01".to_string()),
            occupation: Set(None),
            relationship_to_student: Set("guardian".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let child_user = seed_user(db, "child01", UserRole::Student).await;
        let child = students::ActiveModel {
            user_id: Set(child_user.id),
            student_code: Set("S-C".to_string()),
            enrollment_date: Set("2024-09-01".to_string()),
            grade: Set("Grade 2".to_string()),
            section: Set("B".to_string()),
            parent_id: Set(Some(parent.id)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let year = academic_years::ActiveModel {
            name: Set("2024-2025".to_string()),
            start_date: Set("2024-09-01".to_string()),
            end_date: Set("2025-06-30".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let fee = fee_structures::ActiveModel {
            academic_year_id: Set(year.id),
            fee_type: Set("transport".to_string()),
            grade: Set("Grade 2".to_string()),
            amount: Set(120.0),
            due_date: Set("2024-10-01".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        for is_paid in [true, false] {
            fee_payments::ActiveModel {
                student_id: Set(child.id),
                fee_structure_id: Set(fee.id),
                amount_paid: Set(60.0),
                payment_date: Set("2024-09-20".to_string()),
                payment_method: Set("online".to_string()),
                transaction_id: Set(None),
                is_paid: Set(is_paid),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap();
        }

        let dashboard = storage
            .parent_dashboard_impl(&parent_user.into_user())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(dashboard.children.len(), 1);
        assert_eq!(dashboard.unpaid_fees.len(), 1);
        assert!(!dashboard.unpaid_fees[0].is_paid);
        assert_eq!(dashboard.children_attendance[0].attendance_percentage, 0.0);
    }
}
