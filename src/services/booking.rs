//! Session bookings. No payment is taken and status is an unconstrained
//! string that admins overwrite directly.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::booking::{Booking, BookingFilters, CreateBooking, STATUS_PENDING};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::tutor;

/// Book a session with a tutor. The price falls back to the tutor's hourly rate.
pub async fn create(
    pool: &PgPool,
    learner: &CurrentUser,
    input: &CreateBooking,
) -> Result<Booking, AppError> {
    if input.tutor_id == learner.id {
        return Err(AppError::Validation("You cannot book yourself".to_string()));
    }

    let profile = tutor::find_by_id(pool, input.tutor_id).await?;
    if !profile.is_available {
        return Err(AppError::Conflict(
            "This tutor is not accepting bookings".to_string(),
        ));
    }
    let amount = input.amount.unwrap_or(profile.hourly_rate);

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (learner_id, tutor_id, topic, status, amount, scheduled_at, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(learner.id)
    .bind(input.tutor_id)
    .bind(input.topic.trim())
    .bind(STATUS_PENDING)
    .bind(amount)
    .bind(input.scheduled_at)
    .bind(&input.notes)
    .fetch_one(pool)
    .await?;

    tracing::info!(booking_id = %booking.id, tutor_id = %input.tutor_id, amount, "Booking created");
    Ok(booking)
}

/// Bookings where the user is either the learner or the tutor.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    pagination: &Pagination,
) -> Result<PagedResult<Booking>, AppError> {
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE learner_id = $1 OR tutor_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    let items = sqlx::query_as::<_, Booking>(
        r#"
        SELECT * FROM bookings
        WHERE learner_id = $1 OR tutor_id = $1
        ORDER BY created_at DESC NULLS LAST
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// All bookings for the admin view, optionally filtered by exact status.
pub async fn list_all(
    pool: &PgPool,
    filters: &BookingFilters,
    pagination: &Pagination,
) -> Result<PagedResult<Booking>, AppError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE ($1::text IS NULL OR status = $1)",
    )
    .bind(&filters.status)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, Booking>(
        r#"
        SELECT * FROM bookings
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC NULLS LAST
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&filters.status)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Overwrite a booking's status with whatever the admin supplied.
pub async fn update_status(pool: &PgPool, id: Uuid, status: &str) -> Result<Booking, AppError> {
    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status.trim())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Booking {id} not found")))?;

    tracing::info!(booking_id = %id, status = %status, "Booking status updated");
    Ok(booking)
}
