use serde::{Deserialize, Serialize};

/// 注册与登录共用的请求体
#[derive(Debug, Deserialize)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

pub const USER_ALREADY_EXISTS: &str = "A user with that username already exists.";
pub const CREATED_SUCCESSFULLY: &str = "User created successfully.";
pub const USER_NOT_FOUND: &str = "User not found.";
pub const USER_DELETED: &str = "User deleted.";
