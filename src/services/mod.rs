pub mod auth;
pub mod dashboard;
pub mod pages;
pub mod resources;
pub mod teacher_subjects;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use pages::PageService;
pub use resources::ResourceService;
pub use teacher_subjects::TeacherSubjectService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::error;

use crate::access::Actor;
use crate::errors::SchoolError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::storage::Storage;

/// 从 app data 中取出存储，服务实例懒加载时使用
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 字段校验失败
pub(crate) fn field_errors_response(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

pub(crate) fn forbidden_response() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "You do not have permission to perform this action.",
    ))
}

/// 校验信息形如 `field: message` 时归到对应字段
fn validation_errors(message: &str) -> FieldErrors {
    match message.split_once(": ") {
        Some((field, detail))
            if !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            let mut errors = FieldErrors::new();
            errors.add(field, detail);
            errors
        }
        _ => FieldErrors::non_field(message),
    }
}

/// 把业务错误转换为统一响应
///
/// `unique_together` 为资源的联合唯一字段，用于生成唯一约束冲突的提示。
pub(crate) fn error_response(err: SchoolError, unique_together: &[&str]) -> HttpResponse {
    match err {
        SchoolError::Validation(msg) => field_errors_response(validation_errors(&msg)),
        SchoolError::NotFound(msg) => {
            let code = if msg.contains("profile") {
                ErrorCode::ProfileNotFound
            } else {
                ErrorCode::NotFound
            };
            HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg))
        }
        SchoolError::Conflict(msg) => {
            let detail = if unique_together.is_empty() {
                "A record with these values already exists.".to_string()
            } else {
                format!(
                    "The fields {} must make a unique set.",
                    unique_together.join(", ")
                )
            };
            tracing::debug!("Unique constraint violated: {msg}");
            HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::ResourceConflict,
                FieldErrors::non_field(detail),
                "Unique constraint violated",
            ))
        }
        SchoolError::InvalidReference(msg) => {
            tracing::debug!("Foreign key violated: {msg}");
            HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::BadRequest,
                FieldErrors::non_field("Invalid pk - object does not exist."),
                "Invalid reference",
            ))
        }
        SchoolError::DateParse(msg) | SchoolError::Serialization(msg) => {
            field_errors_response(FieldErrors::non_field(msg))
        }
        SchoolError::Authentication(msg) => {
            HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg))
        }
        SchoolError::Authorization(_) => forbidden_response(),
        other => {
            error!("{}", other.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ))
        }
    }
}

/// 当前请求的调用者，需在 RequireJWT 之后使用
pub(crate) async fn current_actor(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Actor, HttpResponse> {
    let user = RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication credentials were not provided.",
        ))
    })?;
    storage
        .resolve_actor(user)
        .await
        .map_err(|e| error_response(e, &[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_message_with_field_prefix() {
        let errors = validation_errors("teacher_id: This field is required.");
        assert_eq!(errors.messages("teacher_id"), ["This field is required.".to_string()]);

        let errors = validation_errors("Password must contain at least one digit");
        assert!(errors.contains(crate::models::common::validation::NON_FIELD_ERRORS));
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (SchoolError::validation("x"), StatusCode::BAD_REQUEST),
            (SchoolError::not_found("x"), StatusCode::NOT_FOUND),
            (SchoolError::conflict("x"), StatusCode::BAD_REQUEST),
            (SchoolError::invalid_reference("x"), StatusCode::BAD_REQUEST),
            (SchoolError::authentication("x"), StatusCode::UNAUTHORIZED),
            (SchoolError::authorization("x"), StatusCode::FORBIDDEN),
            (SchoolError::database_operation("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(err, &[]).status(), status);
        }
    }
}
