use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    credentials: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(credentials.into_inner(), &req).await
}

pub async fn refresh_token(body: web::Json<RefreshTokenRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(body.into_inner()).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

// 配置路由，注册路由需在 users 资源之前
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/login", web::post().to(login))
        .route("/api/v1/token/", web::post().to(login))
        .route("/api/v1/token/refresh/", web::post().to(refresh_token))
        .route("/api/v1/users/register", web::post().to(register))
        .service(
            web::scope("/api/v1/auth")
                .wrap(middlewares::RequireJWT)
                .route("/me", web::get().to(get_user)),
        );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use std::sync::Arc;

    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::testing::memory_storage;

    async fn storage_with_user(active: bool) -> Arc<dyn Storage> {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        storage
            .create_user(CreateUserRequest {
                username: "mr_teacher".to_string(),
                email: "teacher@example.com".to_string(),
                password: "SecureP@ss1".to_string(),
                role: Some(UserRole::Teacher),
                first_name: String::new(),
                last_name: String::new(),
                phone_number: None,
                address: None,
                date_of_birth: None,
                is_active: Some(active),
                is_staff: None,
            })
            .await
            .unwrap();
        storage
    }

    #[actix_web::test]
    async fn test_login_issues_token_pair() {
        let storage = storage_with_user(true).await;
        let cache = crate::cache::create_cache().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/token/")
            .set_json(serde_json::json!({
                "username": "teacher@example.com",
                "password": "SecureP@ss1"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let access = body["data"]["access"].as_str().unwrap().to_string();
        assert!(body["data"]["refresh"].is_string());
        assert_eq!(body["data"]["user"]["role"], "teacher");

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {access}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_failures_use_generic_message() {
        for (active, password, expected) in [
            (true, "WrongP@ss1", "Unable to log in with provided credentials."),
            (false, "SecureP@ss1", "User account is disabled."),
        ] {
            let storage = storage_with_user(active).await;
            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(storage))
                    .configure(configure_auth_routes),
            )
            .await;
            let req = test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(serde_json::json!({"username": "mr_teacher", "password": password}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], expected);
        }
    }

    #[actix_web::test]
    async fn test_refresh_rejects_garbage() {
        let app = test::init_service(App::new().configure(configure_auth_routes)).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/token/refresh/")
            .set_json(serde_json::json!({"refresh": "not-a-token"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_register_creates_student() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_auth_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/users/register")
            .set_json(serde_json::json!({
                "username": "new_kid",
                "email": "kid@example.com",
                "password": "SecureP@ss1",
                "role": "admin"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["role"], "student");
        assert!(body["data"]["tokens"]["access"].is_string());
    }
}
