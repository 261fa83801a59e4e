use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors,
    auth::{RegisterRequest, RegisterResponse},
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::services::{error_response, field_errors_response};
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

/// 注册请求的字段校验
pub(crate) fn validate_registration(req: &RegisterRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_username(&req.username) {
        errors.add("username", msg);
    }
    if let Err(msg) = validate_email(&req.email) {
        errors.add("email", msg);
    }
    if let Err(msg) = validate_password_simple(&req.password) {
        errors.add("password", msg);
    }
    errors
}

/// 注册账号固定为学生角色
pub(crate) fn registration_to_user(req: RegisterRequest) -> CreateUserRequest {
    CreateUserRequest {
        username: req.username,
        email: req.email,
        password: req.password,
        role: Some(UserRole::Student),
        first_name: req.first_name,
        last_name: req.last_name,
        phone_number: req.phone_number,
        address: None,
        date_of_birth: None,
        is_active: Some(true),
        is_staff: Some(false),
    }
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(errors) = validate_registration(&register_request).into_result() {
        return Ok(field_errors_response(errors));
    }

    let user = match storage
        .create_user(registration_to_user(register_request))
        .await
    {
        Ok(user) => user,
        Err(SchoolError::Conflict(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::UserAlreadyExists,
                FieldErrors::non_field("A user with that username or email already exists."),
                "Registration failed",
            )));
        }
        Err(e) => return Ok(error_response(e, &[])),
    };

    tracing::info!("New student account registered: {}", user.username);

    match service.issue_tokens(&user) {
        Ok(tokens) => Ok(HttpResponse::Created().json(ApiResponse::success(
            RegisterResponse { user, tokens },
            "Registration successful",
        ))),
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration succeeded but token generation failed",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone_number: None,
        }
    }

    #[test]
    fn test_registration_rules() {
        let errors = validate_registration(&request("grace_h", "grace@example.com", "SecureP@ss1"));
        assert!(errors.is_empty());

        let errors = validate_registration(&request("gh", "grace", "weak"));
        assert!(errors.contains("username"));
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
    }

    #[test]
    fn test_registration_is_always_student() {
        let user = registration_to_user(request("grace_h", "grace@example.com", "SecureP@ss1"));
        assert_eq!(user.role, Some(UserRole::Student));
        assert_eq!(user.is_staff, Some(false));
    }
}
