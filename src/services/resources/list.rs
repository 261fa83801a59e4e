use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResourceService;
use crate::models::{ApiResponse, PaginationQuery};
use crate::resources::CrudResource;
use crate::services::{current_actor, error_response};
use crate::storage::resources;

pub async fn list_resources<R: CrudResource>(
    service: &ResourceService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match current_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(response) => return Ok(response),
    };

    let (page, size) = query.bounded();
    match resources::list::<R>(storage.connection(), &R::scope(&actor), page, size).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            format!("{} list retrieved successfully", R::NAME),
        ))),
        Err(e) => Ok(error_response(e, R::UNIQUE_TOGETHER)),
    }
}
