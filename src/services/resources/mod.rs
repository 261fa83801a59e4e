//! 通用资源服务
//!
//! 任意 `CrudResource` 的列表、创建、查询、更新与删除，调用者范围与写权限由资源自身给出。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::PaginationQuery;
use crate::resources::CrudResource;
use crate::storage::Storage;

pub struct ResourceService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResourceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list<R: CrudResource>(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_resources::<R>(self, query, request).await
    }

    pub async fn create<R: CrudResource>(
        &self,
        payload: R::Create,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_resource::<R>(self, payload, request).await
    }

    pub async fn get<R: CrudResource>(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_resource::<R>(self, id, request).await
    }

    pub async fn update<R: CrudResource>(
        &self,
        id: i64,
        payload: R::Update,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_resource::<R>(self, id, payload, request).await
    }

    pub async fn delete<R: CrudResource>(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_resource::<R>(self, id, request).await
    }
}

pub(crate) fn not_found<R: CrudResource>() -> HttpResponse {
    HttpResponse::NotFound().json(crate::models::ApiResponse::error_empty(
        crate::models::ErrorCode::NotFound,
        format!("{} not found", R::NAME),
    ))
}
