use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use sea_orm::IntoActiveModel;
use tracing::{info, warn};

use super::{ResourceService, not_found};
use crate::access::Action;
use crate::models::ApiResponse;
use crate::resources::CrudResource;
use crate::services::{current_actor, error_response, field_errors_response, forbidden_response};
use crate::storage::resources;

/// 部分更新，请求中缺省的字段保持不变
pub async fn update_resource<R: CrudResource>(
    service: &ResourceService,
    id: i64,
    payload: R::Update,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match current_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(response) => return Ok(response),
    };

    if !R::permits(&actor, Action::Update) {
        return Ok(forbidden_response());
    }

    let scope = R::write_scope(&actor);
    let original = match resources::find::<R>(storage.connection(), &scope, id).await {
        Ok(Some(model)) => model,
        Ok(None) => return Ok(not_found::<R>()),
        Err(e) => return Ok(error_response(e, R::UNIQUE_TOGETHER)),
    };

    let mut model = original.clone().into_active_model();
    let now = chrono::Utc::now().timestamp();
    if let Err(e) = R::apply_update(&mut model, payload, now) {
        return Ok(error_response(e, R::UNIQUE_TOGETHER));
    }

    if let Err(errors) = R::validate(&model).into_result() {
        return Ok(field_errors_response(errors));
    }

    match R::validate_related(storage.connection(), &model).await {
        Ok(errors) if !errors.is_empty() => return Ok(field_errors_response(errors)),
        Ok(_) => {}
        Err(e) => return Ok(error_response(e, R::UNIQUE_TOGETHER)),
    }

    match resources::update::<R>(storage.connection(), original, model).await {
        Ok(updated) => {
            info!("{} {} updated by user {}", R::NAME, id, actor.id());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                R::Output::from(updated),
                format!("{} updated successfully", R::NAME),
            )))
        }
        Err(e) => {
            warn!("Failed to update {} {}: {}", R::NAME, id, e);
            Ok(error_response(e, R::UNIQUE_TOGETHER))
        }
    }
}
