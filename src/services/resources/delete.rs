use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ResourceService, not_found};
use crate::access::Action;
use crate::models::ApiResponse;
use crate::resources::CrudResource;
use crate::services::{current_actor, error_response, forbidden_response};
use crate::storage::resources;

pub async fn delete_resource<R: CrudResource>(
    service: &ResourceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match current_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(response) => return Ok(response),
    };

    if !R::permits(&actor, Action::Delete) {
        return Ok(forbidden_response());
    }

    // 范围之外的记录按不存在处理
    match resources::find::<R>(storage.connection(), &R::write_scope(&actor), id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found::<R>()),
        Err(e) => return Ok(error_response(e, R::UNIQUE_TOGETHER)),
    }

    match resources::delete::<R>(storage.connection(), id).await {
        Ok(true) => {
            info!("{} {} deleted by user {}", R::NAME, id, actor.id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(format!(
                "{} deleted successfully",
                R::NAME
            ))))
        }
        Ok(false) => Ok(not_found::<R>()),
        Err(e) => Ok(error_response(e, R::UNIQUE_TOGETHER)),
    }
}
