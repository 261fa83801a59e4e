//! 服务端渲染的页面
//!
//! 与 API 分离，使用 HttpOnly 的 `session` cookie 保存登录状态。

pub mod dashboard;
pub mod templates;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::models::users::entities::{User, UserRole};
use crate::services::auth::login::{ACCOUNT_DISABLED, INVALID_CREDENTIALS};
use crate::services::auth::register::{registration_to_user, validate_registration};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

pub struct PageService {
    storage: Option<Arc<dyn Storage>>,
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn html(status: actix_web::http::StatusCode, body: Option<String>) -> HttpResponse {
    match body {
        Some(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        None => HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body("Template not found"),
    }
}

fn system_name() -> &'static str {
    &AppConfig::get().app.system_name
}

/// 按角色取看板数据并渲染，档案缺失时返回 None
async fn dashboard_body(storage: &Arc<dyn Storage>, user: &User) -> Result<Option<String>> {
    let body = match user.role {
        UserRole::Admin | UserRole::Principal => {
            let actor = storage.resolve_actor(user.clone()).await?;
            Some(dashboard::admin_html(&storage.admin_dashboard(&actor).await?))
        }
        UserRole::Teacher => storage
            .teacher_dashboard(user)
            .await?
            .as_ref()
            .map(dashboard::teacher_html),
        UserRole::Student => storage
            .student_dashboard(user)
            .await?
            .as_ref()
            .map(dashboard::student_html),
        UserRole::Parent => storage
            .parent_dashboard(user)
            .await?
            .as_ref()
            .map(dashboard::parent_html),
    };
    Ok(body)
}

fn notice(message: &str) -> String {
    format!(r#"<p class="notice">{}</p>"#, templates::escape_html(message))
}

impl PageService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    /// 会话 cookie 对应的有效用户
    async fn session_user(&self, request: &HttpRequest) -> Option<User> {
        let token = JwtUtils::extract_session_token_from_cookie(request)?;
        let claims = JwtUtils::verify_session_token(&token).ok()?;
        let user_id = JwtUtils::user_id(&claims).ok()?;
        let user = self
            .get_storage(request)
            .get_user_by_id(user_id)
            .await
            .ok()
            .flatten()?;
        user.is_active.then_some(user)
    }

    pub async fn home(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let nav = match self.session_user(request).await {
            Some(_) => r#"<a href="/dashboard">Dashboard</a> | <a href="/logout">Logout</a>"#,
            None => r#"<a href="/login">Login</a> | <a href="/register">Register</a>"#,
        };
        Ok(html(
            actix_web::http::StatusCode::OK,
            templates::render(
                "home.html",
                &[("SYSTEM_NAME", system_name())],
                &[("NAV", nav)],
            ),
        ))
    }

    fn login_page(
        status: actix_web::http::StatusCode,
        username: &str,
        error: &str,
    ) -> HttpResponse {
        html(
            status,
            templates::render(
                "login.html",
                &[
                    ("SYSTEM_NAME", system_name()),
                    ("USERNAME", username),
                    ("ERROR", error),
                ],
                &[],
            ),
        )
    }

    pub async fn login_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        if self.session_user(request).await.is_some() {
            return Ok(redirect("/dashboard"));
        }
        Ok(Self::login_page(actix_web::http::StatusCode::OK, "", ""))
    }

    pub async fn login_submit(
        &self,
        form: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let user = match storage.get_user_by_username_or_email(&form.username).await {
            Ok(Some(user)) if verify_password(&form.password, &user.password_hash) => user,
            Ok(_) => {
                return Ok(Self::login_page(
                    actix_web::http::StatusCode::OK,
                    &form.username,
                    INVALID_CREDENTIALS,
                ));
            }
            Err(e) => {
                tracing::error!("Page login lookup failed: {}", e);
                return Ok(Self::login_page(
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    &form.username,
                    "Login failed, please try again later.",
                ));
            }
        };

        if !user.is_active {
            return Ok(Self::login_page(
                actix_web::http::StatusCode::OK,
                &form.username,
                ACCOUNT_DISABLED,
            ));
        }

        match JwtUtils::generate_session_token(user.id, user.role.as_str()) {
            Ok(token) => {
                if let Err(e) = storage.update_last_login(user.id).await {
                    tracing::warn!("Failed to update last login for {}: {}", user.id, e);
                }
                tracing::info!("User {} signed in to the portal", user.username);
                Ok(HttpResponse::Found()
                    .cookie(JwtUtils::create_session_cookie(&token))
                    .insert_header((header::LOCATION, "/dashboard"))
                    .finish())
            }
            Err(e) => {
                tracing::error!("Failed to generate session token: {}", e);
                Ok(Self::login_page(
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    &form.username,
                    "Login failed, please try again later.",
                ))
            }
        }
    }

    fn register_page(form: Option<&RegisterRequest>, error: &str) -> HttpResponse {
        let field = |f: fn(&RegisterRequest) -> &str| form.map(f).unwrap_or_default();
        html(
            actix_web::http::StatusCode::OK,
            templates::render(
                "register.html",
                &[
                    ("SYSTEM_NAME", system_name()),
                    ("USERNAME", field(|r| r.username.as_str())),
                    ("EMAIL", field(|r| r.email.as_str())),
                    ("FIRST_NAME", field(|r| r.first_name.as_str())),
                    ("LAST_NAME", field(|r| r.last_name.as_str())),
                    ("ERROR", error),
                ],
                &[],
            ),
        )
    }

    pub async fn register_form(&self) -> ActixResult<HttpResponse> {
        Ok(Self::register_page(None, ""))
    }

    /// 注册学生账号后跳转到登录页
    pub async fn register_submit(
        &self,
        form: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let errors = validate_registration(&form);
        if !errors.is_empty() {
            let message = ["username", "email", "password"]
                .iter()
                .flat_map(|field| errors.messages(field))
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            return Ok(Self::register_page(Some(&form), &message));
        }

        let storage = self.get_storage(request);
        match storage.create_user(registration_to_user(form.clone())).await {
            Ok(user) => {
                tracing::info!("New student account registered via portal: {}", user.username);
                Ok(redirect("/login"))
            }
            Err(SchoolError::Conflict(_)) => Ok(Self::register_page(
                Some(&form),
                "A user with that username or email already exists.",
            )),
            Err(e) => {
                tracing::error!("Portal registration failed: {}", e);
                Ok(Self::register_page(
                    Some(&form),
                    "Registration failed, please try again later.",
                ))
            }
        }
    }

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = self.session_user(request).await else {
            return Ok(HttpResponse::Found()
                .cookie(JwtUtils::create_empty_session_cookie())
                .insert_header((header::LOCATION, "/login"))
                .finish());
        };
        let body = match dashboard_body(&self.get_storage(request), &user).await {
            Ok(Some(body)) => body,
            Ok(None) => notice(&format!(
                "{} profile not found. Please contact the school office.",
                user.role.display_name()
            )),
            Err(e) => {
                tracing::error!("Failed to load dashboard for user {}: {}", user.id, e);
                notice("Dashboard data is unavailable right now.")
            }
        };
        let full_name = user.full_name();
        Ok(html(
            actix_web::http::StatusCode::OK,
            templates::render(
                "dashboard.html",
                &[
                    ("SYSTEM_NAME", system_name()),
                    ("FULL_NAME", &full_name),
                    ("ROLE", user.role.as_str()),
                ],
                &[("DASHBOARD", &body)],
            ),
        ))
    }

    pub async fn logout(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Found()
            .cookie(JwtUtils::create_empty_session_cookie())
            .insert_header((header::LOCATION, "/"))
            .finish())
    }
}
