use axum::{
    extract::{Extension, Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    auth::TokenClaims,
    database::RepositoryError,
    error::{AppError, MessageResponse},
    utils::{hash_password, payload_error, require_non_blank, verify_password},
};

use super::model::{
    CREATED_SUCCESSFULLY, LoginResponse, RefreshTokenResponse, USER_ALREADY_EXISTS, USER_DELETED,
    USER_NOT_FOUND, UserCredentials,
};
use crate::routes::require_admin;

fn credentials(
    payload: Result<Json<UserCredentials>, JsonRejection>,
) -> Result<UserCredentials, AppError> {
    let Json(creds) = payload.map_err(payload_error)?;
    require_non_blank("username", &creds.username)?;
    require_non_blank("password", &creds.password)?;
    Ok(creds)
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<UserCredentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let creds = credentials(payload)?;

    if state.users.find_by_username(&creds.username).await?.is_some() {
        return Err(AppError::AlreadyExists(USER_ALREADY_EXISTS.to_string()));
    }

    // bcrypt 计算较慢，放到阻塞线程池
    let cost = state.config.bcrypt_cost;
    let password = creds.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::internal("An error occurred while creating the user.", e))?
        .map_err(|e| AppError::internal("An error occurred while creating the user.", e))?;

    match state.users.create(&creds.username, &password_hash).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            MessageResponse::new(CREATED_SUCCESSFULLY),
        )),
        Err(RepositoryError::Conflict) => {
            Err(AppError::AlreadyExists(USER_ALREADY_EXISTS.to_string()))
        }
        Err(e) => Err(AppError::internal(
            "An error occurred while creating the user.",
            e,
        )),
    }
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<UserCredentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let creds = credentials(payload)?;

    let user = state.users.find_by_username(&creds.username).await?;

    // 用户不存在时按同一 cost 做一次哈希，响应耗时不暴露用户名是否存在
    let stored = user.as_ref().map(|user| user.password.clone());
    let cost = state.config.bcrypt_cost;
    let password = creds.password;
    let valid = tokio::task::spawn_blocking(move || match stored {
        // 库中的值不是合法哈希时按密码错误处理
        Some(stored) => verify_password(&password, &stored).unwrap_or(false),
        None => {
            let _ = hash_password(&password, cost);
            false
        }
    })
    .await
    .map_err(|e| AppError::internal("An error occurred while logging in.", e))?;

    let Some(user) = user.filter(|_| valid) else {
        tracing::info!("Failed login for {}", creds.username);
        return Err(AppError::InvalidCredentials);
    };

    // 登录直接签发的访问令牌总是 fresh
    let access = state
        .issuer
        .issue_access_token(user.id, true)
        .map_err(|e| AppError::internal("An error occurred while issuing tokens.", e))?;
    let refresh = state
        .issuer
        .issue_refresh_token(user.id)
        .map_err(|e| AppError::internal("An error occurred while issuing tokens.", e))?;

    tracing::info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        access_token: access.token,
        refresh_token: refresh.token,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state
        .validator
        .blacklist()
        .add(&claims.jti, claims.exp)
        .await
        .map_err(|e| AppError::internal("An error occurred while logging out.", e))?;

    tracing::info!("User {} logged out, revoked {}", claims.sub, claims.jti);
    Ok(MessageResponse::new(format!(
        "User <id={}> successfully logged out.",
        claims.sub
    )))
}

/// 用刷新令牌换取新的访问令牌，新令牌不是 fresh
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let access = state
        .issuer
        .issue_access_token(claims.identity(), false)
        .map_err(|e| AppError::internal("An error occurred while issuing tokens.", e))?;

    Ok(Json(RefreshTokenResponse {
        access_token: access.token,
    }))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    match state.users.find_by_id(user_id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(AppError::NotFound(USER_NOT_FOUND)),
    }
}

#[axum::debug_handler]
pub async fn delete_user(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&claims)?;

    if !state.users.delete(user_id).await? {
        return Err(AppError::NotFound(USER_NOT_FOUND));
    }
    tracing::info!("User {} deleted by {}", user_id, claims.sub);
    Ok(MessageResponse::new(USER_DELETED))
}
