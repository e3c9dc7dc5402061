//! Tutor application routes: submit, review queue, approve, reject.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::models::application::{
    ApplicationFilters, RejectApplication, SubmitApplication, TutorApplication,
};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::tutor::TutorProfile;
use crate::services::application as app_service;
use crate::AppState;

/// POST /api/v1/applications: apply to become a tutor.
pub async fn submit(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SubmitApplication>,
) -> Result<Json<ApiResponse<TutorApplication>>, AppError> {
    body.validate()?;
    let app = app_service::submit(&state.db, &current_user, &body).await?;
    Ok(ApiResponse::success(app))
}

/// GET /api/v1/applications: review queue (admin).
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<ApplicationFilters>,
) -> Result<Json<ApiResponse<PagedResult<TutorApplication>>>, AppError> {
    let result = app_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/applications/{id} (admin).
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TutorApplication>>, AppError> {
    let app = app_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(app))
}

/// POST /api/v1/applications/{id}/approve: returns the new tutor profile.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TutorProfile>>, AppError> {
    let profile = app_service::approve(&state.db, id, &admin).await?;
    Ok(ApiResponse::success(profile))
}

/// POST /api/v1/applications/{id}/reject: body `{ "reason": "..." }`.
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectApplication>,
) -> Result<Json<ApiResponse<TutorApplication>>, AppError> {
    let app = app_service::reject(&state.db, id, &admin, body.reason.as_deref()).await?;
    Ok(ApiResponse::success(app))
}
