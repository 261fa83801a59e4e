use crate::models::users::entities::User;
use serde::Serialize;

/// 令牌对
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPairResponse,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub tokens: TokenPairResponse,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}
