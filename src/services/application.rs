//! Tutor application review: submission, listing, approval and rejection.
//!
//! Approval marks the application approved, creates the tutor profile from
//! it and promotes the applicant to the `Tutor` role. All three writes share
//! one transaction, so a failure leaves no half-approved application behind.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::application::{
    ApplicationFilters, SubmitApplication, TutorApplication, STATUS_APPROVED, STATUS_PENDING,
    STATUS_REJECTED,
};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::tutor::TutorProfile;

/// Profile fields copied from an application, with gaps defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTutorProfile {
    pub id: Uuid,
    pub display_name: String,
    pub bio: String,
    pub subjects: serde_json::Value,
    pub hourly_rate: f64,
    pub experience_years: i32,
    pub education: String,
}

impl From<&TutorApplication> for NewTutorProfile {
    fn from(app: &TutorApplication) -> Self {
        let subjects = if app.subjects.is_array() {
            app.subjects.clone()
        } else {
            serde_json::json!([])
        };

        Self {
            id: app.user_id,
            display_name: app.display_name.clone().unwrap_or_default(),
            bio: app.bio.clone().unwrap_or_default(),
            subjects,
            hourly_rate: app.hourly_rate.filter(|r| r.is_finite()).unwrap_or(0.0),
            experience_years: app.experience_years.unwrap_or(0),
            education: app.education.clone().unwrap_or_default(),
        }
    }
}

/// An application may be approved from any state except `approved`.
fn ensure_approvable(app: &TutorApplication) -> Result<(), AppError> {
    if app.is_approved() {
        return Err(AppError::Conflict(format!(
            "Application {} is already approved",
            app.id
        )));
    }
    Ok(())
}

/// Trimmed rejection reason, or `Validation` when missing or blank.
fn rejection_reason(reason: Option<&str>) -> Result<&str, AppError> {
    reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("A rejection reason is required".to_string()))
}

/// The partial unique index on pending applications turns a second
/// submission into a unique violation.
fn submit_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("You already have an application under review".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// File a new application for the current user.
pub async fn submit(
    pool: &PgPool,
    applicant: &CurrentUser,
    input: &SubmitApplication,
) -> Result<TutorApplication, AppError> {
    let subjects = serde_json::json!(input.subjects.clone().unwrap_or_default());

    let app = sqlx::query_as::<_, TutorApplication>(
        r#"
        INSERT INTO tutor_applications (user_id, display_name, email, bio, subjects,
            hourly_rate, experience_years, education, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(applicant.id)
    .bind(&input.display_name)
    .bind(&applicant.email)
    .bind(&input.bio)
    .bind(&subjects)
    .bind(input.hourly_rate)
    .bind(input.experience_years)
    .bind(&input.education)
    .bind(STATUS_PENDING)
    .fetch_one(pool)
    .await
    .map_err(submit_error)?;

    tracing::info!(application_id = %app.id, user_id = %applicant.id, "Tutor application submitted");
    Ok(app)
}

/// List applications, newest first, optionally filtered by status.
pub async fn list(
    pool: &PgPool,
    filters: &ApplicationFilters,
    pagination: &Pagination,
) -> Result<PagedResult<TutorApplication>, AppError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tutor_applications WHERE ($1::text IS NULL OR status = $1)",
    )
    .bind(&filters.status)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, TutorApplication>(
        r#"
        SELECT * FROM tutor_applications
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
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

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<TutorApplication, AppError> {
    sqlx::query_as::<_, TutorApplication>("SELECT * FROM tutor_applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

/// Approve an application and create the applicant's tutor profile.
pub async fn approve(
    pool: &PgPool,
    id: Uuid,
    reviewer: &CurrentUser,
) -> Result<TutorProfile, AppError> {
    let mut tx = pool.begin().await?;

    let app = sqlx::query_as::<_, TutorApplication>(
        "SELECT * FROM tutor_applications WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    ensure_approvable(&app)?;

    sqlx::query(
        r#"
        UPDATE tutor_applications
        SET status = $1, reviewed_by = $2, reviewed_at = $3, rejection_reason = NULL
        WHERE id = $4
        "#,
    )
    .bind(STATUS_APPROVED)
    .bind(reviewer.id)
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let new_profile = NewTutorProfile::from(&app);
    let profile = sqlx::query_as::<_, TutorProfile>(
        r#"
        INSERT INTO tutor_profiles (id, display_name, bio, subjects, hourly_rate,
            experience_years, education, rating, review_count, total_sessions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 0, 0, 0)
        RETURNING *
        "#,
    )
    .bind(new_profile.id)
    .bind(&new_profile.display_name)
    .bind(&new_profile.bio)
    .bind(&new_profile.subjects)
    .bind(new_profile.hourly_rate)
    .bind(new_profile.experience_years)
    .bind(&new_profile.education)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Applicant already has a tutor profile".to_string())
        }
        _ => AppError::Database(e),
    })?;

    sqlx::query("UPDATE users SET role = 'Tutor' WHERE id = $1 AND role = 'Learner'")
        .bind(app.user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        application_id = %id,
        tutor_id = %profile.id,
        reviewer = %reviewer.id,
        "Tutor application approved"
    );
    Ok(profile)
}

/// Reject an application. A non-blank reason is required.
pub async fn reject(
    pool: &PgPool,
    id: Uuid,
    reviewer: &CurrentUser,
    reason: Option<&str>,
) -> Result<TutorApplication, AppError> {
    let reason = rejection_reason(reason)?;

    let app = sqlx::query_as::<_, TutorApplication>(
        r#"
        UPDATE tutor_applications
        SET status = $1, rejection_reason = $2, reviewed_by = $3, reviewed_at = $4
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(STATUS_REJECTED)
    .bind(reason)
    .bind(reviewer.id)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    tracing::info!(application_id = %id, reviewer = %reviewer.id, "Tutor application rejected");
    Ok(app)
}
