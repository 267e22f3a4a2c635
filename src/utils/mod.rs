use axum::extract::rejection::JsonRejection;
use bcrypt::{hash, verify};

use crate::error::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// 请求体解析失败统一返回 400
pub fn payload_error(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

/// 字段不能为空白
pub fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("'{}' cannot be blank.", field)));
    }
    Ok(())
}
