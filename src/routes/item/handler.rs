use axum::{
    extract::{Extension, Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    auth::TokenClaims,
    database::{ItemFields, RepositoryError},
    error::{AppError, MessageResponse},
    routes::require_admin,
    utils::payload_error,
};

use super::model::{
    ERROR_INSERTING, ERROR_UPDATING, ITEM_DELETED, ITEM_NOT_FOUND, ItemListResponse,
    name_already_exists,
};

#[axum::debug_handler]
pub async fn get_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match state.items.find_by_name(&name).await? {
        Some(item) => Ok(Json(item)),
        None => Err(AppError::NotFound(ITEM_NOT_FOUND)),
    }
}

/// 需要 fresh 令牌
#[axum::debug_handler]
pub async fn create_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<ItemFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    if state.items.find_by_name(&name).await?.is_some() {
        return Err(AppError::AlreadyExists(name_already_exists(&name)));
    }
    let Json(fields) = payload.map_err(payload_error)?;

    match state.items.create(&name, fields).await {
        Ok(item) => Ok((StatusCode::CREATED, Json(item))),
        Err(RepositoryError::Conflict) => Err(AppError::AlreadyExists(name_already_exists(&name))),
        Err(e) => Err(AppError::internal(ERROR_INSERTING, e)),
    }
}

#[axum::debug_handler]
pub async fn put_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<ItemFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(fields) = payload.map_err(payload_error)?;

    let item = state
        .items
        .upsert(&name, fields)
        .await
        .map_err(|e| AppError::internal(ERROR_UPDATING, e))?;
    Ok(Json(item))
}

/// 需要管理员声明
#[axum::debug_handler]
pub async fn delete_item(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&claims)?;

    if !state.items.delete(&name).await? {
        return Err(AppError::NotFound(ITEM_NOT_FOUND));
    }
    Ok(MessageResponse::new(ITEM_DELETED))
}

#[axum::debug_handler]
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = state.items.find_all().await?;
    Ok(Json(ItemListResponse { items }))
}
