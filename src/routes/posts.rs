//! Social feed routes and admin moderation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::post::{CreatePost, Post, SetVisibility};
use crate::services::post as post_service;
use crate::AppState;

/// GET /api/v1/posts: visible posts, newest first.
pub async fn feed(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<Post>>>, AppError> {
    let result = post_service::list(&state.db, false, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/posts
pub async fn create(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreatePost>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    body.validate()?;
    let post = post_service::create(&state.db, current_user.id, &body.content).await?;
    Ok(ApiResponse::success(post))
}

/// GET /api/v1/admin/posts: includes hidden posts.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<Post>>>, AppError> {
    let result = post_service::list(&state.db, true, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// PATCH /api/v1/admin/posts/{id}/visibility: body `{ "hidden": true }`.
pub async fn set_visibility(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<SetVisibility>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = post_service::set_hidden(&state.db, id, body.hidden).await?;
    Ok(ApiResponse::success(post))
}
