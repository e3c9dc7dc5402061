//! Admin dashboard summary counters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analytics::PlatformStats;
use crate::services::analytics;

/// Headline numbers for the admin overview page.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_users: i64,
    pub total_tutors: i64,
    pub total_bookings: i64,
    pub total_posts: i64,
    pub hidden_posts: i64,
    pub pending_applications: i64,
    pub total_revenue: f64,
    pub completed_sessions: u64,
    pub platform_stats: PlatformStats,
    pub recent_bookings: Vec<RecentBooking>,
}

/// Recent booking entry for the dashboard feed.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RecentBooking {
    pub id: Uuid,
    pub learner_name: Option<String>,
    pub tutor_name: Option<String>,
    pub topic: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Collection-wide counts in one round trip.
#[derive(Debug, sqlx::FromRow)]
struct CountsRow {
    total_users: i64,
    total_tutors: i64,
    total_bookings: i64,
    total_posts: i64,
    hidden_posts: i64,
    pending_applications: i64,
}

/// Fetch counters and revenue in parallel queries.
pub async fn get_summary(pool: &PgPool) -> Result<DashboardSummary, AppError> {
    let (counts, bookings, recent_bookings) = tokio::try_join!(
        fetch_counts(pool),
        analytics::fetch_booking_records(pool),
        fetch_recent_bookings(pool),
    )?;

    let revenue = analytics::compute_monthly_revenue(&bookings);
    let platform_stats =
        analytics::compute_platform_stats(revenue.total_revenue, revenue.completed_count);

    Ok(DashboardSummary {
        total_users: counts.total_users,
        total_tutors: counts.total_tutors,
        total_bookings: counts.total_bookings,
        total_posts: counts.total_posts,
        hidden_posts: counts.hidden_posts,
        pending_applications: counts.pending_applications,
        total_revenue: revenue.total_revenue,
        completed_sessions: revenue.completed_count,
        platform_stats,
        recent_bookings,
    })
}

async fn fetch_counts(pool: &PgPool) -> Result<CountsRow, AppError> {
    let row = sqlx::query_as::<_, CountsRow>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users)                                          AS total_users,
            (SELECT COUNT(*) FROM tutor_profiles)                                 AS total_tutors,
            (SELECT COUNT(*) FROM bookings)                                       AS total_bookings,
            (SELECT COUNT(*) FROM posts)                                          AS total_posts,
            (SELECT COUNT(*) FROM posts WHERE is_hidden)                          AS hidden_posts,
            (SELECT COUNT(*) FROM tutor_applications WHERE status = 'pending')    AS pending_applications
        "#,
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Fetch the 5 most recent bookings with participant names.
async fn fetch_recent_bookings(pool: &PgPool) -> Result<Vec<RecentBooking>, AppError> {
    let rows = sqlx::query_as::<_, RecentBooking>(
        r#"
        SELECT b.id, l.display_name AS learner_name, t.display_name AS tutor_name,
               b.topic, b.status, b.amount, b.created_at
        FROM bookings b
        LEFT JOIN users l ON l.id = b.learner_id
        LEFT JOIN tutor_profiles t ON t.id = b.tutor_id
        ORDER BY b.created_at DESC NULLS LAST
        LIMIT 5
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
