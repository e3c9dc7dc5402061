//! Booking routes for learners and admins.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::models::booking::{Booking, BookingFilters, CreateBooking, UpdateBookingStatus};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::booking as booking_service;
use crate::AppState;

/// POST /api/v1/bookings
pub async fn create(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreateBooking>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    body.validate()?;
    let booking = booking_service::create(&state.db, &current_user, &body).await?;
    Ok(ApiResponse::success(booking))
}

/// GET /api/v1/bookings/mine: as learner or as tutor.
pub async fn mine(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<Booking>>>, AppError> {
    let result = booking_service::list_for_user(&state.db, current_user.id, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/admin/bookings?status=
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<ApiResponse<PagedResult<Booking>>>, AppError> {
    let result = booking_service::list_all(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// PATCH /api/v1/admin/bookings/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookingStatus>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    body.validate()?;
    let booking = booking_service::update_status(&state.db, id, &body.status).await?;
    Ok(ApiResponse::success(booking))
}
