//! Admin analytics: pure reducers over full collection snapshots.
//!
//! Every reducer is best-effort. Missing or malformed fields are defaulted or
//! skipped, never reported. [`get_report`] is the only function here that
//! touches the database; it holds no cache and re-reads every collection on
//! each call.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::analytics::{
    AnalyticsReport, BookingRecord, DailyCount, MonthlyAmount, MonthlyRevenue, PlatformStats,
    SubjectCount, TopTutor, TutorRecord, UserRecord,
};
use crate::models::booking::STATUS_COMPLETED;

/// Share of completed-booking revenue kept by the platform.
pub const PLATFORM_FEE_RATE: f64 = 0.15;

/// Share of completed-booking revenue paid out to tutors.
pub const TUTOR_PAYOUT_RATE: f64 = 0.85;

/// Number of most recent signup days kept in the growth series.
pub const USER_GROWTH_DAYS: usize = 30;

/// Number of most recent months kept in the revenue series.
pub const REVENUE_MONTHS: usize = 6;

/// Default length of the top-tutor and top-subject rankings.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

fn is_completed(booking: &BookingRecord) -> bool {
    booking.status.as_deref() == Some(STATUS_COMPLETED)
}

/// Booking amount with missing and non-finite values treated as zero.
fn amount_of(booking: &BookingRecord) -> f64 {
    booking.amount.filter(|a| a.is_finite()).unwrap_or(0.0)
}

/// Keep only the last `n` entries of an ordered map.
fn most_recent<K, V>(map: BTreeMap<K, V>, n: usize) -> impl Iterator<Item = (K, V)> {
    let skip = map.len().saturating_sub(n);
    map.into_iter().skip(skip)
}

/// Count signups per UTC calendar day, oldest first, last 30 days that had
/// any signups. Days without signups are absent rather than zero.
pub fn compute_user_growth(users: &[UserRecord]) -> Vec<DailyCount> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for created_at in users.iter().filter_map(|u| u.created_at) {
        *by_day.entry(created_at.date_naive()).or_insert(0) += 1;
    }

    most_recent(by_day, USER_GROWTH_DAYS)
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Sum completed, timestamped bookings per `YYYY-MM`, oldest first, keeping
/// the last six months. Totals cover every month, not just the kept ones.
pub fn compute_monthly_revenue(bookings: &[BookingRecord]) -> MonthlyRevenue {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    let mut total_revenue = 0.0;
    let mut completed_count = 0;

    for booking in bookings.iter().filter(|b| is_completed(b)) {
        let Some(created_at) = booking.created_at else {
            continue;
        };
        let amount = amount_of(booking);
        *by_month
            .entry((created_at.year(), created_at.month()))
            .or_insert(0.0) += amount;
        total_revenue += amount;
        completed_count += 1;
    }

    let months = most_recent(by_month, REVENUE_MONTHS)
        .map(|((year, month), amount)| MonthlyAmount {
            month: format!("{year:04}-{month:02}"),
            amount,
        })
        .collect();

    MonthlyRevenue {
        months,
        total_revenue,
        completed_count,
    }
}

/// Apply the fixed platform/tutor split to aggregate revenue.
pub fn compute_platform_stats(total_revenue: f64, completed_count: u64) -> PlatformStats {
    let average_session_price = if completed_count > 0 {
        total_revenue / completed_count as f64
    } else {
        0.0
    };

    PlatformStats {
        platform_fees: total_revenue * PLATFORM_FEE_RATE,
        tutor_payouts: total_revenue * TUTOR_PAYOUT_RATE,
        average_session_price,
    }
}

/// Rank known tutors by their payout share of completed bookings.
///
/// Every profile starts at zero, so tutors with no completed sessions can
/// still appear. Bookings pointing at an unknown tutor id are dropped.
/// Ties on earnings are broken by tutor id, ascending.
pub fn compute_top_tutors(
    bookings: &[BookingRecord],
    tutors: &[TutorRecord],
    limit: usize,
) -> Vec<TopTutor> {
    let mut by_id: HashMap<&str, TopTutor> = tutors
        .iter()
        .map(|t| {
            (
                t.id.as_str(),
                TopTutor {
                    tutor_id: t.id.clone(),
                    name: t.display_name.clone().unwrap_or_default(),
                    sessions: 0,
                    earnings: 0.0,
                },
            )
        })
        .collect();

    for booking in bookings.iter().filter(|b| is_completed(b)) {
        let Some(entry) = booking
            .tutor_id
            .as_deref()
            .and_then(|id| by_id.get_mut(id))
        else {
            continue;
        };
        entry.sessions += 1;
        entry.earnings += amount_of(booking) * TUTOR_PAYOUT_RATE;
    }

    let mut ranked: Vec<TopTutor> = by_id.into_values().collect();
    ranked.sort_by(|a, b| {
        b.earnings
            .total_cmp(&a.earnings)
            .then_with(|| a.tutor_id.cmp(&b.tutor_id))
    });
    ranked.truncate(limit);
    ranked
}

/// Count bookings of any status per non-empty topic. Ties on count are broken
/// by topic, ascending.
pub fn compute_top_subjects(bookings: &[BookingRecord], limit: usize) -> Vec<SubjectCount> {
    let mut by_topic: HashMap<&str, u64> = HashMap::new();
    for topic in bookings
        .iter()
        .filter_map(|b| b.topic.as_deref())
        .filter(|t| !t.is_empty())
    {
        *by_topic.entry(topic).or_insert(0) += 1;
    }

    let mut ranked: Vec<SubjectCount> = by_topic
        .into_iter()
        .map(|(topic, count)| SubjectCount {
            topic: topic.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
    ranked.truncate(limit);
    ranked
}

/// Run every reducer over one snapshot of the three collections.
pub fn build_report(
    users: &[UserRecord],
    bookings: &[BookingRecord],
    tutors: &[TutorRecord],
) -> AnalyticsReport {
    let revenue = compute_monthly_revenue(bookings);
    let platform_stats = compute_platform_stats(revenue.total_revenue, revenue.completed_count);

    AnalyticsReport {
        total_users: users.len(),
        total_bookings: bookings.len(),
        user_growth: compute_user_growth(users),
        monthly_revenue: revenue.months,
        total_revenue: revenue.total_revenue,
        completed_count: revenue.completed_count,
        platform_stats,
        top_tutors: compute_top_tutors(bookings, tutors, DEFAULT_RANKING_LIMIT),
        top_subjects: compute_top_subjects(bookings, DEFAULT_RANKING_LIMIT),
    }
}

/// Fetch full snapshots of users, bookings and tutor profiles, then aggregate.
pub async fn get_report(pool: &PgPool) -> Result<AnalyticsReport, AppError> {
    let (users, bookings, tutors) = tokio::try_join!(
        fetch_user_records(pool),
        fetch_booking_records(pool),
        fetch_tutor_records(pool),
    )?;

    tracing::debug!(
        users = users.len(),
        bookings = bookings.len(),
        tutors = tutors.len(),
        "Aggregating analytics snapshot"
    );

    Ok(build_report(&users, &bookings, &tutors))
}

pub(crate) async fn fetch_user_records(pool: &PgPool) -> Result<Vec<UserRecord>, AppError> {
    let rows = sqlx::query_as::<_, UserRecord>("SELECT created_at FROM users")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub(crate) async fn fetch_booking_records(pool: &PgPool) -> Result<Vec<BookingRecord>, AppError> {
    let rows = sqlx::query_as::<_, BookingRecord>(
        "SELECT status, amount, created_at, tutor_id::text AS tutor_id, topic FROM bookings",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub(crate) async fn fetch_tutor_records(pool: &PgPool) -> Result<Vec<TutorRecord>, AppError> {
    let rows = sqlx::query_as::<_, TutorRecord>(
        "SELECT id::text AS id, display_name FROM tutor_profiles",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
