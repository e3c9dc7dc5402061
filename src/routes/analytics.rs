//! Admin analytics route.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::analytics::AnalyticsReport;
use crate::services::analytics;
use crate::AppState;

/// GET /api/v1/admin/analytics: growth, revenue and rankings, recomputed per call.
pub async fn report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<AnalyticsReport>>, AppError> {
    let report = analytics::get_report(&state.db).await?;
    Ok(ApiResponse::success(report))
}
