//! Dashboard routes: summary counters for the admin overview page.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::services::dashboard::{self, DashboardSummary};
use crate::AppState;

/// GET /api/v1/admin/dashboard
pub async fn summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let summary = dashboard::get_summary(&state.db).await?;
    Ok(ApiResponse::success(summary))
}
