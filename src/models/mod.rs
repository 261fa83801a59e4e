//! 数据模型定义
//!
//! 业务实体、请求与响应结构，与 `entity` 中的数据库实体分离。

pub mod academics;
pub mod assessments;
pub mod attendance;
pub mod auth;
pub mod common;
pub mod communications;
pub mod dashboard;
pub mod fees;
pub mod profiles;
pub mod users;

pub use common::{ApiResponse, FieldErrors, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 响应中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    // 通用
    Success = 0,
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 认证与用户
    AuthFailed = 2000,
    UserAlreadyExists = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserNotFound = 2005,
    AccountDisabled = 2006,

    // 业务数据
    ProfileNotFound = 3000,
    ResourceConflict = 3001,
}
