use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    auth::TokenClaims,
    database::{RepositoryError, StoreEntity, StoreView},
    error::{AppError, MessageResponse},
    routes::require_admin,
};

use super::model::{
    ERROR_CREATING, STORE_DELETED, STORE_NOT_FOUND, StoreListResponse, name_already_exists,
};

async fn with_items(state: &AppState, store: StoreEntity) -> Result<StoreView, AppError> {
    let items = state.items.find_by_store(store.id).await?;
    Ok(StoreView::new(store, items))
}

#[axum::debug_handler]
pub async fn get_store(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Some(store) = state.stores.find_by_name(&name).await? else {
        return Err(AppError::NotFound(STORE_NOT_FOUND));
    };
    Ok(Json(with_items(&state, store).await?))
}

#[axum::debug_handler]
pub async fn create_store(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.stores.find_by_name(&name).await?.is_some() {
        return Err(AppError::AlreadyExists(name_already_exists(&name)));
    }

    match state.stores.create(&name).await {
        Ok(store) => Ok((StatusCode::CREATED, Json(StoreView::new(store, Vec::new())))),
        Err(RepositoryError::Conflict) => Err(AppError::AlreadyExists(name_already_exists(&name))),
        Err(e) => Err(AppError::internal(ERROR_CREATING, e)),
    }
}

#[axum::debug_handler]
pub async fn delete_store(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&claims)?;

    if !state.stores.delete(&name).await? {
        return Err(AppError::NotFound(STORE_NOT_FOUND));
    }
    Ok(MessageResponse::new(STORE_DELETED))
}

#[axum::debug_handler]
pub async fn list_stores(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut stores = Vec::new();
    for store in state.stores.find_all().await? {
        stores.push(with_items(&state, store).await?);
    }
    Ok(Json(StoreListResponse { stores }))
}
