//! 角色看板

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::{current_actor, error_response};

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

/// 档案缺失时的 404
fn profile_missing(role: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ProfileNotFound,
        format!("{role} profile not found"),
    ))
}

fn render<T: Serialize>(result: Result<Option<T>>, role: &str) -> HttpResponse {
    match result {
        Ok(Some(dashboard)) => HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard retrieved successfully",
        )),
        Ok(None) => profile_missing(role),
        Err(e) => error_response(e, &[]),
    }
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    fn unauthorized() -> HttpResponse {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication credentials were not provided.",
        ))
    }

    // 管理员看板，角色限制由路由上的 RequireRole 完成
    pub async fn admin(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let actor = match current_actor(&storage, request).await {
            Ok(actor) => actor,
            Err(response) => return Ok(response),
        };
        match storage.admin_dashboard(&actor).await {
            Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                dashboard,
                "Dashboard retrieved successfully",
            ))),
            Err(e) => Ok(error_response(e, &[])),
        }
    }

    pub async fn teacher(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user(request) else {
            return Ok(Self::unauthorized());
        };
        let storage = self.get_storage(request);
        let dashboard = storage.teacher_dashboard(&user).await;
        Ok(render(dashboard, UserRole::Teacher.display_name()))
    }

    pub async fn student(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user(request) else {
            return Ok(Self::unauthorized());
        };
        let storage = self.get_storage(request);
        let dashboard = storage.student_dashboard(&user).await;
        Ok(render(dashboard, UserRole::Student.display_name()))
    }

    pub async fn parent(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user(request) else {
            return Ok(Self::unauthorized());
        };
        let storage = self.get_storage(request);
        let dashboard = storage.parent_dashboard(&user).await;
        Ok(render(dashboard, UserRole::Parent.display_name()))
    }
}
