//! Public tutor directory.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::tutor::{TutorFilters, TutorProfile};

/// List available tutors, best rated first.
pub async fn list(
    pool: &PgPool,
    filters: &TutorFilters,
    pagination: &Pagination,
) -> Result<PagedResult<TutorProfile>, AppError> {
    let pattern = filters.search_pattern();

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM tutor_profiles
        WHERE is_available
          AND ($1::text IS NULL OR display_name ILIKE $1 OR subjects::text ILIKE $1)
        "#,
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, TutorProfile>(
        r#"
        SELECT * FROM tutor_profiles
        WHERE is_available
          AND ($1::text IS NULL OR display_name ILIKE $1 OR subjects::text ILIKE $1)
        ORDER BY rating DESC, review_count DESC, id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<TutorProfile, AppError> {
    sqlx::query_as::<_, TutorProfile>("SELECT * FROM tutor_profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tutor {id} not found")))
}
