//! Item catalog API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CommentDto, CreateCommentRequest, CreateItemRequest, ItemDto, SearchParams, UpdateItemRequest,
};
use crate::application::CreateItem;
use crate::interfaces::http::common::{ApiResponse, OffsetParams, ValidatedJson};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::extract::SharerUserId;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    request_body = CreateItemRequest,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    responses(
        (status = 201, description = "Item created", body = ApiResponse<ItemDto>),
        (status = 404, description = "Owner not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    SharerUserId(owner_id): SharerUserId,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ItemDto>>), ApiError> {
    let item = state
        .items
        .create_item(
            owner_id,
            CreateItem {
                name: request.name,
                description: request.description,
                available: request.available,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ItemDto::from(item))),
    ))
}

#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "Items",
    request_body = UpdateItemRequest,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemDto>),
        (status = 404, description = "Item not found or not owned by the caller")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateItemRequest>,
) -> Result<Json<ApiResponse<ItemDto>>, ApiError> {
    let item = state.items.update_item(user_id, id, request.into()).await?;
    Ok(Json(ApiResponse::success(ItemDto::from(item))))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner")
    ),
    responses(
        (status = 200, description = "Item deleted with its bookings and comments"),
        (status = 404, description = "Item not found or not owned by the caller")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.items.delete_item(user_id, id).await?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Item details", body = ApiResponse<ItemDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ItemDto>>, ApiError> {
    let view = state.items.get_item(user_id, id).await?;
    Ok(Json(ApiResponse::success(ItemDto::from(view))))
}

#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    params(
        OffsetParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Owner")
    ),
    responses(
        (status = 200, description = "Owner's items with last/next bookings", body = ApiResponse<Vec<ItemDto>>)
    )
)]
pub async fn list_owner_items(
    State(state): State<AppState>,
    SharerUserId(owner_id): SharerUserId,
    Query(params): Query<OffsetParams>,
) -> Result<Json<ApiResponse<Vec<ItemDto>>>, ApiError> {
    let views = state
        .items
        .list_owner_items(owner_id, params.from, params.size)
        .await?;
    Ok(Json(ApiResponse::success(
        views.into_iter().map(ItemDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/items/search",
    tag = "Items",
    params(SearchParams),
    responses(
        (status = 200, description = "Available items matching the text", body = ApiResponse<Vec<ItemDto>>)
    )
)]
pub async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<ItemDto>>>, ApiError> {
    let items = state
        .items
        .search_items(&params.text, params.from, params.size)
        .await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(ItemDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "Items",
    request_body = CreateCommentRequest,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Author")
    ),
    responses(
        (status = 200, description = "Comment added", body = ApiResponse<CommentDto>),
        (status = 400, description = "Author has no finished booking of the item")
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> Result<Json<ApiResponse<CommentDto>>, ApiError> {
    let comment = state.items.add_comment(user_id, id, &request.text).await?;
    Ok(Json(ApiResponse::success(CommentDto::from(comment))))
}
