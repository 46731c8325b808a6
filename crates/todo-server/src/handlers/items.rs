//! Item handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use todo_core::{CreateItemRequest, Item, ItemId, PageQuery, UpdateItemRequest};

type ApiResult<T> = Result<T, ApiError>;

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(req) = body?;
    let item = state.items.create(req).await?;
    Ok(Json(item))
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Item>>> {
    let Query(query) = query?;
    let items = state.items.list(query).await?;
    Ok(Json(items))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Json<Item>> {
    let Path(id) = id?;
    let item = state.items.get(id).await?;
    Ok(Json(item))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
    body: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Path(id) = id?;
    let Json(req) = body?;
    let item = state.items.update(id, req).await?;
    Ok(Json(item))
}

/// Responds with the now empty collection
pub async fn delete_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    state.items.delete_all().await?;
    Ok(Json(Vec::new()))
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
