//! 请求体与查询参数的解析错误处理
//!
//! 统一返回 400，`data.non_field_errors` 中给出解析器的原始信息。

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError, UrlencodedError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode, FieldErrors};

fn bad_request<E>(err: E, req: &HttpRequest, message: &str) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    debug!("{} {}: {}", message, req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::BadRequest,
        FieldErrors::non_field(err.to_string()),
        message,
    ));
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req, "Invalid JSON payload")
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req, "Invalid query parameters")
}

pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req, "Invalid form data")
}
