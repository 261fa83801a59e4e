use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ResourceService;
use crate::access::Action;
use crate::models::ApiResponse;
use crate::resources::CrudResource;
use crate::services::{current_actor, error_response, field_errors_response, forbidden_response};
use crate::storage::resources;

pub async fn create_resource<R: CrudResource>(
    service: &ResourceService,
    payload: R::Create,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match current_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(response) => return Ok(response),
    };

    if !R::permits(&actor, Action::Create) {
        return Ok(forbidden_response());
    }

    // 1. 与调用者相关的请求校验
    if let Err(errors) = R::validate_create(&actor, &payload).into_result() {
        return Ok(field_errors_response(errors));
    }

    // 2. 构造记录，归属字段由调用者决定
    let now = chrono::Utc::now().timestamp();
    let model = match R::new_model(&actor, payload, now) {
        Ok(model) => model,
        Err(e) => return Ok(error_response(e, R::UNIQUE_TOGETHER)),
    };

    // 3. 字段校验，之后是依赖关联记录的校验
    if let Err(errors) = R::validate(&model).into_result() {
        return Ok(field_errors_response(errors));
    }
    match R::validate_related(storage.connection(), &model).await {
        Ok(errors) if !errors.is_empty() => return Ok(field_errors_response(errors)),
        Ok(_) => {}
        Err(e) => return Ok(error_response(e, R::UNIQUE_TOGETHER)),
    }

    // 4. 写入
    match resources::insert::<R>(storage.connection(), model).await {
        Ok(created) => {
            info!("{} created by user {}", R::NAME, actor.id());
            Ok(HttpResponse::Created().json(ApiResponse::success(
                R::Output::from(created),
                format!("{} created successfully", R::NAME),
            )))
        }
        Err(e) => {
            warn!("Failed to create {}: {}", R::NAME, e);
            Ok(error_response(e, R::UNIQUE_TOGETHER))
        }
    }
}
