//! 通用资源路由
//!
//! 每个资源注册在 `/api/v1/{PATH}` 下，全部需要 JWT 认证。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::profiles::requests::SetTeacherSubjectsRequest;
use crate::resources::{self as res, CrudResource};
use crate::services::{ResourceService, TeacherSubjectService};
use crate::utils::SafeIDI64;

// 懒加载的全局服务实例
static RESOURCE_SERVICE: Lazy<ResourceService> = Lazy::new(ResourceService::new_lazy);
static TEACHER_SUBJECT_SERVICE: Lazy<TeacherSubjectService> =
    Lazy::new(TeacherSubjectService::new_lazy);

// HTTP处理程序
pub async fn list<R: CrudResource>(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.list::<R>(query.into_inner(), &req).await
}

pub async fn create<R: CrudResource>(
    req: HttpRequest,
    payload: web::Json<R::Create>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.create::<R>(payload.into_inner(), &req).await
}

pub async fn retrieve<R: CrudResource>(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.get::<R>(id.0, &req).await
}

pub async fn update<R: CrudResource>(
    req: HttpRequest,
    id: SafeIDI64,
    payload: web::Json<R::Update>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .update::<R>(id.0, payload.into_inner(), &req)
        .await
}

pub async fn delete<R: CrudResource>(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.delete::<R>(id.0, &req).await
}

pub async fn list_teacher_subjects(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SUBJECT_SERVICE.list(id.0, &req).await
}

pub async fn replace_teacher_subjects(
    req: HttpRequest,
    id: SafeIDI64,
    payload: web::Json<SetTeacherSubjectsRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SUBJECT_SERVICE
        .replace(id.0, payload.into_inner(), &req)
        .await
}

/// 注册单个资源的五个端点
pub fn configure_resource<R: CrudResource>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(&format!("/api/v1/{}", R::PATH))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list::<R>))
            .route("", web::post().to(create::<R>))
            .route("/{id}", web::get().to(retrieve::<R>))
            .route("/{id}", web::put().to(update::<R>))
            .route("/{id}", web::delete().to(delete::<R>)),
    );
}

// 配置路由，教师科目需在 teachers 资源之前注册
pub fn configure_resource_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/teachers/{id}/subjects")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(list_teacher_subjects))
            .route(web::put().to(replace_teacher_subjects)),
    );

    configure_resource::<res::UserResource>(cfg);
    configure_resource::<res::StudentResource>(cfg);
    configure_resource::<res::TeacherResource>(cfg);
    configure_resource::<res::ParentResource>(cfg);
    configure_resource::<res::AcademicYearResource>(cfg);
    configure_resource::<res::ClassResource>(cfg);
    configure_resource::<res::SubjectResource>(cfg);
    configure_resource::<res::ClassSubjectResource>(cfg);
    configure_resource::<res::TimetableResource>(cfg);
    configure_resource::<res::ContentResource>(cfg);
    configure_resource::<res::AssessmentResource>(cfg);
    configure_resource::<res::QuestionResource>(cfg);
    configure_resource::<res::SubmissionResource>(cfg);
    configure_resource::<res::AttendanceResource>(cfg);
    configure_resource::<res::FeeStructureResource>(cfg);
    configure_resource::<res::FeePaymentResource>(cfg);
    configure_resource::<res::AnnouncementResource>(cfg);
    configure_resource::<res::MessageResource>(cfg);
    configure_resource::<res::NotificationResource>(cfg);
    configure_resource::<res::ReportResource>(cfg);
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use sea_orm::{ActiveModelTrait, Set};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use super::*;
    use crate::entity::{subjects, teachers};
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::testing::{memory_storage, seed_user};
    use crate::utils::jwt::JwtUtils;

    fn bearer(user_id: i64, role: UserRole) -> (&'static str, String) {
        let pair = JwtUtils::generate_token_pair(user_id, role.as_str()).unwrap();
        ("Authorization", format!("Bearer {}", pair.access_token))
    }

    macro_rules! academy_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($storage.clone()))
                    .app_data(web::Data::new(crate::cache::create_cache().unwrap()))
                    .app_data(
                        web::JsonConfig::default()
                            .error_handler(crate::utils::json_error_handler),
                    )
                    .configure(configure_resource_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_requires_bearer_token() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let app = academy_app!(storage);
        let req = test::TestRequest::get().uri("/api/v1/students").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_teacher_content_owner_is_forced() {
        let sea = memory_storage().await;
        let db = sea.db.clone();
        let storage: Arc<dyn Storage> = Arc::new(sea);
        let user = seed_user(&db, "teacher01", UserRole::Teacher).await;
        let teacher = teachers::ActiveModel {
            user_id: Set(user.id),
            teacher_code: Set("T-01".to_string()),
            hire_date: Set("2020-01-01".to_string()),
            qualifications: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let subject = subjects::ActiveModel {
            name: Set("Mathematics".to_string()),
            code: Set("MATH1".to_string()),
            description: Set(None),
            grade: Set("Grade 1".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let app = academy_app!(storage);
        let req = test::TestRequest::post()
            .uri("/api/v1/content")
            .insert_header(bearer(user.id, UserRole::Teacher))
            .set_json(json!({
                "title": "Fractions",
                "content_type": "pdf",
                "file": "content/fractions.pdf",
                "subject_id": subject.id,
                "grade": "Grade 1",
                "uploaded_by": 999
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["uploaded_by"], teacher.id);
    }

    #[actix_web::test]
    async fn test_period_out_of_range_rejected() {
        let sea = memory_storage().await;
        let db = sea.db.clone();
        let storage: Arc<dyn Storage> = Arc::new(sea);
        let admin = seed_user(&db, "admin01", UserRole::Admin).await;

        let app = academy_app!(storage);
        let req = test::TestRequest::post()
            .uri("/api/v1/timetables")
            .insert_header(bearer(admin.id, UserRole::Admin))
            .set_json(json!({
                "class_id": 1,
                "day": "monday",
                "period": 9,
                "subject_id": 1,
                "start_time": "08:00",
                "end_time": "08:45"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["data"]["period"],
            json!(["Ensure this value is between 1 and 8."])
        );
    }

    #[actix_web::test]
    async fn test_parent_cannot_create_class() {
        let sea = memory_storage().await;
        let db = sea.db.clone();
        let storage: Arc<dyn Storage> = Arc::new(sea);
        let parent = seed_user(&db, "parent01", UserRole::Parent).await;

        let app = academy_app!(storage);
        let req = test::TestRequest::post()
            .uri("/api/v1/classes")
            .insert_header(bearer(parent.id, UserRole::Parent))
            .set_json(json!({"grade": "Grade 1", "section": "A", "academic_year_id": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_out_of_scope_user_is_not_found() {
        let sea = memory_storage().await;
        let db = sea.db.clone();
        let storage: Arc<dyn Storage> = Arc::new(sea);
        let student = seed_user(&db, "student01", UserRole::Student).await;
        let other = seed_user(&db, "student02", UserRole::Student).await;

        let app = academy_app!(storage);
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", other.id))
            .insert_header(bearer(student.id, UserRole::Student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", student.id))
            .insert_header(bearer(student.id, UserRole::Student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_teacher_subjects_routes() {
        let sea = memory_storage().await;
        let db = sea.db.clone();
        let storage: Arc<dyn Storage> = Arc::new(sea);
        let admin = seed_user(&db, "admin01", UserRole::Admin).await;
        let user = seed_user(&db, "teacher01", UserRole::Teacher).await;
        let teacher = teachers::ActiveModel {
            user_id: Set(user.id),
            teacher_code: Set("T-01".to_string()),
            hire_date: Set("2020-01-01".to_string()),
            qualifications: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let subject = subjects::ActiveModel {
            name: Set("Physics".to_string()),
            code: Set("PHY9".to_string()),
            description: Set(None),
            grade: Set("Grade 9".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let app = academy_app!(storage);
        let uri = format!("/api/v1/teachers/{}/subjects", teacher.id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(user.id, UserRole::Teacher))
            .set_json(json!({"subject_ids": [subject.id]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(admin.id, UserRole::Admin))
            .set_json(json!({"subject_ids": [subject.id]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(user.id, UserRole::Teacher))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["code"], "PHY9");
    }
}
