use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResourceService, not_found};
use crate::models::ApiResponse;
use crate::resources::CrudResource;
use crate::services::{current_actor, error_response};
use crate::storage::resources;

pub async fn get_resource<R: CrudResource>(
    service: &ResourceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match current_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(response) => return Ok(response),
    };

    match resources::find::<R>(storage.connection(), &R::scope(&actor), id).await {
        Ok(Some(model)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            R::Output::from(model),
            format!("{} retrieved successfully", R::NAME),
        ))),
        Ok(None) => Ok(not_found::<R>()),
        Err(e) => Ok(error_response(e, R::UNIQUE_TOGETHER)),
    }
}
