use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::services::PageService;

// 懒加载的全局 PageService 实例
static PAGE_SERVICE: Lazy<PageService> = Lazy::new(PageService::new_lazy);

pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.home(&req).await
}

pub async fn login_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.login_form(&req).await
}

pub async fn login_submit(
    req: HttpRequest,
    form: web::Form<LoginRequest>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.login_submit(form.into_inner(), &req).await
}

pub async fn register_form() -> ActixResult<HttpResponse> {
    PAGE_SERVICE.register_form().await
}

pub async fn register_submit(
    req: HttpRequest,
    form: web::Form<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.register_submit(form.into_inner(), &req).await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.dashboard(&req).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    PAGE_SERVICE.logout().await
}

/// 配置页面路由
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/login", web::get().to(login_form))
        .route("/login", web::post().to(login_submit))
        .route("/register", web::get().to(register_form))
        .route("/register", web::post().to(register_submit))
        .route("/dashboard", web::get().to(dashboard))
        .route("/logout", web::get().to(logout));
}
