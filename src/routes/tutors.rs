//! Public tutor directory routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::tutor::{TutorFilters, TutorProfile};
use crate::services::tutor as tutor_service;
use crate::AppState;

/// GET /api/v1/tutors?search=
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<TutorFilters>,
) -> Result<Json<ApiResponse<PagedResult<TutorProfile>>>, AppError> {
    let result = tutor_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/tutors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TutorProfile>>, AppError> {
    let tutor = tutor_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(tutor))
}
