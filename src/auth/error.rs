use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// 令牌校验失败的五种结果，统一返回 401
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("request does not contain an access token")]
    MissingToken,
    #[error("token is malformed, has a bad signature or is of the wrong kind")]
    InvalidToken,
    #[error("token has expired")]
    ExpiredToken,
    #[error("token has been revoked")]
    RevokedToken,
    #[error("token is not fresh")]
    FreshTokenRequired,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "authorization_required",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "token_expired",
            AuthError::RevokedToken => "token_revoked",
            AuthError::FreshTokenRequired => "fresh_token_required",
        }
    }

    fn body(&self) -> serde_json::Value {
        let code = self.error_code();
        match self {
            AuthError::ExpiredToken => json!({
                "message": "The token has expired.",
                "error": code,
            }),
            AuthError::InvalidToken => json!({
                "message": "Signature verification failed.",
                "error": code,
            }),
            AuthError::MissingToken => json!({
                "description": "Request does not contain an access token.",
                "error": code,
            }),
            AuthError::FreshTokenRequired => json!({
                "description": "The token is not fresh.",
                "error": code,
            }),
            AuthError::RevokedToken => json!({
                "description": "The token has been revoked.",
                "error": code,
            }),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self.body())).into_response()
    }
}
